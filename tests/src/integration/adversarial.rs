//! # Adversarial Cases
//!
//! Callers without capability, transfers racing registry mutations, and
//! attempts to resurrect retired ids.
//!
//! | Attack | Defense |
//! |--------|---------|
//! | Non-admin mutation | `AdminGrant` issued only by `AdminPolicy` |
//! | Token holder edits debt | Ownership confers no capability |
//! | Re-mint a burned id | Retired is terminal (`ImmutableViolation`) |
//! | Transfer during foreclosure | Transfers never touch registry state |
//! | Forged pre-existing token | Mint checks the ledger first |

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::*;
    use qc_18_property_registry::{
        AssetLifecycle, OwnershipLedger, PropertyRegistryApi, RecordField, RegistryConfig,
        RegistryError,
    };
    use rand::Rng;
    use shared_bus::events::{BlockchainEvent, EventFilter, EventTopic};

    const ATTACKER: [u8; 20] = [0xEE; 20];

    #[tokio::test]
    async fn test_attacker_cannot_touch_any_mutation() {
        let node = Node::start(RegistryConfig::default());
        let parcel = asset("target");
        node.registry.mint(ADMIN, mint_request("target")).await.unwrap();
        let before = node.registry.view(&parcel).await.unwrap();
        let mut monitor = node.bus.subscribe(EventFilter::for_asset(parcel.clone()));

        let attempts = [
            node.registry.set_debt(ATTACKER, &parcel, usd(), 0).await.err(),
            node.registry.foreclose(ATTACKER, &parcel).await.err(),
            node.registry.set_manager(ATTACKER, &parcel, ATTACKER).await.err(),
            node.registry.set_frozen(ATTACKER, &parcel, true).await.err(),
            node.registry.burn(ATTACKER, &parcel).await.err(),
        ];
        for attempt in attempts {
            assert!(matches!(attempt, Some(RegistryError::Unauthorized { .. })));
        }

        assert_eq!(node.registry.view(&parcel).await.unwrap(), before);
        assert!(monitor.drain().is_empty());
    }

    #[tokio::test]
    async fn test_attacker_cannot_mint() {
        let node = Node::start(RegistryConfig::default());
        let err = node
            .registry
            .mint(ATTACKER, mint_request("squat"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Unauthorized { .. }));
        assert_eq!(node.ledger.supply(), 0);
    }

    #[tokio::test]
    async fn test_burned_id_cannot_be_resurrected() {
        let node = Node::start(RegistryConfig::default());
        let parcel = asset("old-title");
        node.registry.mint(ADMIN, mint_request("old-title")).await.unwrap();
        node.registry.burn(ADMIN, &parcel).await.unwrap();

        let mut forged = mint_request("old-title");
        forged.fields.legal_owner = "Shell Co LLC".into();
        assert_eq!(
            node.registry.mint(ADMIN, forged).await.unwrap_err(),
            RegistryError::ImmutableViolation {
                asset: parcel.clone(),
                field: RecordField::Record,
            }
        );
        assert_eq!(
            node.registry.retired_records(&parcel)[0].legal_owner(),
            "Acme LLC"
        );
    }

    #[tokio::test]
    async fn test_pre_minted_token_blocks_registration() {
        let node = Node::start(RegistryConfig::default());
        let parcel = asset("front-run");
        node.ledger.mint(&parcel, ATTACKER).await.unwrap();

        assert_eq!(
            node.registry
                .mint(ADMIN, mint_request("front-run"))
                .await
                .unwrap_err(),
            RegistryError::AlreadyExists(parcel.clone())
        );
        assert_eq!(node.registry.lifecycle_of(&parcel), AssetLifecycle::NonExistent);
    }

    #[tokio::test]
    async fn test_orphan_token_transfer_reaches_dead_letter_queue() {
        let node = Node::start(RegistryConfig::default());
        let orphan = asset("orphan");
        let mut dlq = node
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::DeadLetterQueue]));
        node.ledger.mint(&orphan, ATTACKER).await.unwrap();

        node.ledger.transfer(&orphan, ATTACKER, BUYER).await.unwrap();

        assert!(matches!(
            dlq.drain().as_slice(),
            [BlockchainEvent::CriticalError { subsystem_id: 18, .. }]
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_transfers_racing_foreclosure() {
        let node = Node::start(RegistryConfig::default());
        let parcel = asset("contested");
        node.registry.mint(ADMIN, mint_request("contested")).await.unwrap();
        node.registry
            .set_debt(ADMIN, &parcel, usd(), 500_000)
            .await
            .unwrap();
        let record = node.registry.view(&parcel).await.unwrap().record;

        let ledger = node.ledger.clone();
        let id = parcel.clone();
        let flipper = tokio::spawn(async move {
            let mut holder = SELLER;
            for _ in 0..50 {
                let next = if holder == SELLER { BUYER } else { SELLER };
                ledger.transfer(&id, holder, next).await.unwrap();
                holder = next;
            }
            holder
        });
        let registry = node.registry.clone();
        let id = parcel.clone();
        let foreclosure =
            tokio::spawn(async move { registry.foreclose(ADMIN, &id).await.unwrap() });

        let final_holder = flipper.await.unwrap();
        assert!(foreclosure.await.unwrap());

        let view = node.registry.view(&parcel).await.unwrap();
        assert_eq!(view.owner, final_holder);
        assert_eq!(view.record, record);
        assert_eq!(view.debt.amount, 500_000);
        assert!(view.debt.foreclosed);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_random_admin_traffic_keeps_records_intact() {
        let node = Node::start(RegistryConfig::default());
        let ids: Vec<String> = (0..8).map(|i| format!("estate-{i}")).collect();
        for id in &ids {
            node.registry.mint(ADMIN, mint_request(id)).await.unwrap();
        }

        let mut handles = Vec::new();
        for worker in 0..4 {
            let registry = node.registry.clone();
            let ids = ids.clone();
            handles.push(tokio::spawn(async move {
                let ops: Vec<(usize, u8, i128)> = {
                    let mut rng = rand::thread_rng();
                    (0..64)
                        .map(|_| (rng.gen_range(0..ids.len()), rng.gen_range(0..3), rng.gen()))
                        .collect()
                };
                for (idx, op, amount) in ops {
                    let id = asset(&ids[idx]);
                    let admin = if worker % 2 == 0 { ADMIN } else { CO_ADMIN };
                    let result = match op {
                        0 => registry.set_debt(admin, &id, usd(), amount % 1_000_000).await.map(|_| ()),
                        1 => registry.set_manager(admin, &id, [worker as u8; 20]).await.map(|_| ()),
                        _ => registry.set_frozen(admin, &id, amount % 2 == 0).await.map(|_| ()),
                    };
                    assert!(result.is_ok() || matches!(result, Err(ref e) if e.is_retryable()));
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        for id in &ids {
            let record = node.registry.view(&asset(id)).await.unwrap().record;
            assert_eq!(record.fields(), record_fields("Acme LLC", id));
        }
    }
}
