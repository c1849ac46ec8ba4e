use newssense::domain::{Entity, EntitySet};

#[test]
fn given_duplicate_pairs_when_inserting_then_keeps_one() {
    let mut set = EntitySet::new();

    assert!(set.insert(Entity::new("Reserve Bank", "ORG")));
    assert!(!set.insert(Entity::new("Reserve Bank", "ORG")));
    assert!(!set.insert(Entity::new("  Reserve Bank ", "ORG")));

    assert_eq!(set.len(), 1);
}

#[test]
fn given_same_text_with_different_labels_when_inserting_then_keeps_both() {
    let set: EntitySet = vec![
        Entity::new("Washington", "GPE"),
        Entity::new("Washington", "PERSON"),
    ]
    .into_iter()
    .collect();

    assert_eq!(set.len(), 2);
    assert!(set.contains("Washington", "GPE"));
    assert!(set.contains("Washington", "PERSON"));
}

#[test]
fn given_blank_text_when_inserting_then_rejects() {
    let mut set = EntitySet::new();

    assert!(!set.insert(Entity::new("   ", "ORG")));
    assert!(set.is_empty());
}

#[test]
fn given_entities_when_grouping_then_groups_by_label_in_order() {
    let set: EntitySet = vec![
        Entity::new("Mumbai", "GPE"),
        Entity::new("Infosys", "ORG"),
        Entity::new("Delhi", "GPE"),
        Entity::new("Mumbai", "GPE"),
    ]
    .into_iter()
    .collect();

    let groups = set.grouped_by_label();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups["GPE"], vec!["Delhi", "Mumbai"]);
    assert_eq!(groups["ORG"], vec!["Infosys"]);
}
