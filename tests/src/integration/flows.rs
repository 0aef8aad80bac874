//! # Registry Flows
//!
//! End-to-end property lifecycles across the registry, the ownership ledger
//! and the shared bus:
//!
//! 1. **Mint -> encumber -> sell -> foreclose -> burn** with the event order
//!    a monitor observes
//! 2. **Sale carries rights**: a token transfer is the whole rights transfer
//! 3. **Independent assets** proceed in parallel

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::super::*;
    use qc_18_property_registry::{
        AssetLifecycle, PropertyRegistryApi, RegistryConfig, RegistryError, RetirementPolicy,
    };
    use shared_bus::events::{BlockchainEvent, EventFilter, EventTopic};
    use shared_types::CurrencyRef;

    // =============================================================================
    // LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_full_lifecycle_event_order() {
        let node = Node::start(RegistryConfig::default());
        let parcel = asset("madison-1200");
        let mut monitor = node.bus.subscribe(EventFilter::for_asset(parcel.clone()));

        node.registry
            .mint(ADMIN, mint_request("madison-1200"))
            .await
            .unwrap();
        node.registry
            .set_debt(ADMIN, &parcel, usd(), 250_000)
            .await
            .unwrap();
        node.ledger.transfer(&parcel, SELLER, BUYER).await.unwrap();
        node.registry.foreclose(CO_ADMIN, &parcel).await.unwrap();
        node.registry.burn(ADMIN, &parcel).await.unwrap();

        let events = monitor.drain();
        let topics: Vec<EventTopic> = events.iter().map(BlockchainEvent::topic).collect();
        assert_eq!(
            topics,
            vec![
                EventTopic::Lifecycle,
                EventTopic::Debt,
                EventTopic::Ownership,
                EventTopic::Foreclosure,
                EventTopic::Lifecycle,
            ]
        );
        assert_eq!(
            events.last(),
            Some(&BlockchainEvent::AssetBurned {
                asset_id: parcel.clone(),
                last_owner: BUYER,
                foreclosed: true,
            })
        );
        assert_eq!(node.registry.lifecycle_of(&parcel), AssetLifecycle::Retired);
        assert_eq!(node.ledger.supply(), 0);
    }

    #[tokio::test]
    async fn test_foreclosure_notified_once_across_admins() {
        let node = Node::start(RegistryConfig::default());
        let parcel = asset("parcel-42");
        let mut monitor = node
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Foreclosure]));
        node.registry.mint(ADMIN, mint_request("parcel-42")).await.unwrap();

        assert!(node.registry.foreclose(ADMIN, &parcel).await.unwrap());
        assert!(!node.registry.foreclose(CO_ADMIN, &parcel).await.unwrap());
        assert!(!node.registry.foreclose(ADMIN, &parcel).await.unwrap());

        assert_eq!(
            monitor.drain(),
            vec![BlockchainEvent::AssetForeclosed { asset_id: parcel }]
        );
    }

    #[tokio::test]
    async fn test_token_denominated_debt() {
        let node = Node::start(RegistryConfig::default());
        let parcel = asset("parcel-7");
        let stablecoin = CurrencyRef::token([0xCC; 20]);
        node.registry.mint(ADMIN, mint_request("parcel-7")).await.unwrap();

        node.registry
            .set_debt(ADMIN, &parcel, stablecoin.clone(), -1_000)
            .await
            .unwrap();

        let (currency, amount, foreclosed) = node.registry.debt_of(&parcel).unwrap();
        assert_eq!(currency, stablecoin);
        assert_eq!(amount, -1_000);
        assert!(!foreclosed);
        assert!(node.registry.view(&parcel).await.unwrap().debt.in_credit());
    }

    // =============================================================================
    // SALE: RIGHTS TRAVEL WITH THE TOKEN
    // =============================================================================

    #[tokio::test]
    async fn test_sale_transfers_rights_without_registry_writes() {
        let node = Node::start(RegistryConfig::default());
        let parcel = asset("parcel-9");
        node.registry.mint(ADMIN, mint_request("parcel-9")).await.unwrap();
        node.registry
            .set_debt(ADMIN, &parcel, usd(), 80_000)
            .await
            .unwrap();
        let before = node.registry.view(&parcel).await.unwrap();

        node.ledger.transfer(&parcel, SELLER, BUYER).await.unwrap();

        let after = node.registry.view(&parcel).await.unwrap();
        assert_eq!(after.owner, BUYER);
        assert_eq!(after.record, before.record);
        assert_eq!(after.debt, before.debt);
        assert_eq!(after.manager, before.manager);
    }

    #[tokio::test]
    async fn test_buyer_gains_no_admin_power() {
        let node = Node::start(RegistryConfig::default());
        let parcel = asset("parcel-9");
        node.registry.mint(ADMIN, mint_request("parcel-9")).await.unwrap();
        node.ledger.transfer(&parcel, SELLER, BUYER).await.unwrap();

        assert!(matches!(
            node.registry.set_debt(BUYER, &parcel, usd(), 0).await,
            Err(RegistryError::Unauthorized { .. })
        ));
        assert!(matches!(
            node.registry.set_manager(BUYER, &parcel, BUYER).await,
            Err(RegistryError::Unauthorized { .. })
        ));
    }

    #[tokio::test]
    async fn test_view_serializes_for_persistence() {
        let node = Node::start(RegistryConfig::default());
        let parcel = asset("parcel-3");
        node.registry.mint(ADMIN, mint_request("parcel-3")).await.unwrap();

        let view = node.registry.view(&parcel).await.unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["record"]["legal_owner"], "Acme LLC");
        assert_eq!(json["record"]["parcel_id"], "parcel-3");
        assert_eq!(json["lifecycle"], "Active");

        let geo = node.registry.geo_data_of(&parcel).unwrap().to_geojson();
        assert_eq!(geo["type"], "Polygon");
    }

    // =============================================================================
    // INDEPENDENT ASSETS
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_distinct_assets_mint_in_parallel() {
        let node = Node::start(RegistryConfig::default());

        let mut handles = Vec::new();
        for i in 0..32 {
            let registry = node.registry.clone();
            handles.push(tokio::spawn(async move {
                registry.mint(ADMIN, mint_request(&format!("lot-{i}"))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(node.registry.active_assets(), 32);
        assert_eq!(node.ledger.supply(), 32);
    }

    #[tokio::test]
    async fn test_reads_and_writes_on_distinct_assets_interleave() {
        let node = Node::start(
            RegistryConfig::default().with_lock_timeout(Duration::from_millis(50)),
        );
        node.registry.mint(ADMIN, mint_request("busy")).await.unwrap();
        node.registry.mint(ADMIN, mint_request("idle")).await.unwrap();

        let busy = asset("busy");
        let idle = asset("idle");
        let reader = node.registry.clone();
        let (busy_view, idle_debt) = tokio::join!(
            reader.view(&busy),
            node.registry.set_debt(ADMIN, &idle, usd(), 10)
        );
        assert!(busy_view.is_ok());
        assert_eq!(idle_debt.unwrap().amount, 10);
    }

    #[tokio::test]
    async fn test_environment_config_selects_erase() {
        let config = RegistryConfig::from_lookup(|key| match key {
            "QC_REGISTRY_RETIREMENT" => Some("erase".to_string()),
            "QC_REGISTRY_DEFAULT_CURRENCY" => Some("EUR".to_string()),
            _ => None,
        });
        assert_eq!(config.retirement_policy, RetirementPolicy::Erase);

        let node = Node::start(config);
        let parcel = asset("parcel-5");
        node.registry.mint(ADMIN, mint_request("parcel-5")).await.unwrap();
        assert_eq!(
            node.registry.debt_of(&parcel).unwrap().0,
            CurrencyRef::fiat("EUR").unwrap()
        );

        node.registry.burn(ADMIN, &parcel).await.unwrap();
        assert!(node.registry.retired_records(&parcel).is_empty());
    }
}
