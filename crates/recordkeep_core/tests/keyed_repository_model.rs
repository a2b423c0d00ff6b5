use proptest::prelude::*;
use recordkeep_core::{
    DuplicateIdError, ElectronicItem, InvalidQuantityError, KeyedRepository, NotFoundError,
    UpdateError,
};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug)]
enum Op {
    Add { id: u32, quantity: i64 },
    Remove { id: u32 },
    UpdateQuantity { id: u32, quantity: i64 },
    GetById { id: u32 },
}

// Small id space so duplicates and misses are frequent.
fn arb_id() -> impl Strategy<Value = u32> {
    0u32..8
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (arb_id(), 0i64..50).prop_map(|(id, quantity)| Op::Add { id, quantity }),
        arb_id().prop_map(|id| Op::Remove { id }),
        (arb_id(), -20i64..50).prop_map(|(id, quantity)| Op::UpdateQuantity { id, quantity }),
        arb_id().prop_map(|id| Op::GetById { id }),
    ]
}

fn item(id: u32, quantity: i64) -> ElectronicItem {
    ElectronicItem::new(id, format!("item-{id}"), quantity, "Acme", 12)
}

fn snapshot(repo: &KeyedRepository<ElectronicItem>) -> HashSet<(u32, i64)> {
    repo.list_all()
        .into_iter()
        .map(|entry| (entry.id, entry.quantity))
        .collect()
}

fn model_snapshot(model: &HashMap<u32, i64>) -> HashSet<(u32, i64)> {
    model.iter().map(|(id, quantity)| (*id, *quantity)).collect()
}

proptest! {
    #[test]
    fn random_sequences_match_map_model(ops in prop::collection::vec(arb_op(), 0..120)) {
        let mut repo = KeyedRepository::new();
        let mut model: HashMap<u32, i64> = HashMap::new();

        for op in ops {
            let before = snapshot(&repo);
            let failed = match op {
                Op::Add { id, quantity } => {
                    let result = repo.add(item(id, quantity));
                    if model.contains_key(&id) {
                        prop_assert_eq!(result, Err(DuplicateIdError { id }));
                        true
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(id, quantity);
                        false
                    }
                }
                Op::Remove { id } => {
                    let result = repo.remove(&id);
                    match model.remove(&id) {
                        Some(quantity) => {
                            let removed = result.unwrap();
                            prop_assert_eq!(removed.id, id);
                            prop_assert_eq!(removed.quantity, quantity);
                            false
                        }
                        None => {
                            prop_assert_eq!(result, Err(NotFoundError { id }));
                            true
                        }
                    }
                }
                Op::UpdateQuantity { id, quantity } => {
                    let result = repo.update_quantity(&id, quantity);
                    if quantity < 0 {
                        prop_assert_eq!(
                            result,
                            Err(UpdateError::InvalidQuantity(InvalidQuantityError::Negative {
                                quantity
                            }))
                        );
                        true
                    } else if let Some(stored) = model.get_mut(&id) {
                        prop_assert!(result.is_ok());
                        *stored = quantity;
                        false
                    } else {
                        prop_assert_eq!(result, Err(UpdateError::NotFound(NotFoundError { id })));
                        true
                    }
                }
                Op::GetById { id } => {
                    match (repo.get_by_id(&id), model.get(&id)) {
                        (Ok(found), Some(quantity)) => {
                            prop_assert_eq!(found.id, id);
                            prop_assert_eq!(found.quantity, *quantity);
                        }
                        (Err(err), None) => prop_assert_eq!(err, NotFoundError { id }),
                        (found, expected) => {
                            prop_assert!(
                                false,
                                "get_by_id({}) = {:?}, model has {:?}",
                                id,
                                found,
                                expected
                            );
                        }
                    }
                    false
                }
            };

            if failed {
                prop_assert_eq!(snapshot(&repo), before);
            }
            prop_assert_eq!(snapshot(&repo), model_snapshot(&model));
            prop_assert_eq!(repo.len(), model.len());
        }
    }

    #[test]
    fn negative_quantity_is_rejected_for_any_id(
        seed in prop::collection::hash_set(arb_id(), 0..5),
        id in arb_id(),
        quantity in i64::MIN..0,
    ) {
        let mut repo =
            KeyedRepository::try_from_entities(seed.iter().map(|id| item(*id, 1))).unwrap();
        let before = snapshot(&repo);

        let err = repo.update_quantity(&id, quantity).unwrap_err();
        prop_assert_eq!(
            err,
            UpdateError::InvalidQuantity(InvalidQuantityError::Negative { quantity })
        );
        prop_assert_eq!(snapshot(&repo), before);
    }

    #[test]
    fn listed_ids_match_added_ids(ids in prop::collection::hash_set(any::<u32>(), 0..40)) {
        let mut repo = KeyedRepository::new();
        for id in &ids {
            repo.add(item(*id, 0)).unwrap();
        }

        let listed: HashSet<u32> = repo.list_all().into_iter().map(|entry| entry.id).collect();
        prop_assert_eq!(&listed, &ids);

        for id in &ids {
            repo.remove(id).unwrap();
        }
        prop_assert!(repo.list_all().is_empty());
    }
}
