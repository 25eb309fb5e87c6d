use proptest::prelude::*;
use rich_delta::{AttrValue, AttributeMap, Delta, Embed, Op, OpKind};
use serde_json::Value;

fn attr_value() -> impl Strategy<Value = AttrValue> {
    prop_oneof![
        Just(AttrValue::from(true)),
        (1i64..5).prop_map(AttrValue::from),
        "[a-c]{1,2}".prop_map(AttrValue::from),
        Just(AttrValue::Cleared),
    ]
}

fn attribute_map() -> impl Strategy<Value = Option<AttributeMap>> {
    prop::collection::btree_map(
        prop::sample::select(vec!["bold", "italic", "list", "size"]),
        attr_value(),
        0..3,
    )
    .prop_map(|entries| {
        let map: AttributeMap = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        if map.is_empty() { None } else { Some(map) }
    })
}

#[derive(Clone, Debug)]
enum Step {
    Insert(String, Option<AttributeMap>),
    Embed(Option<AttributeMap>),
    Delete(usize),
    Retain(usize, Option<AttributeMap>),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        ("[a-e]{0,4}", attribute_map()).prop_map(|(t, a)| Step::Insert(t, a)),
        attribute_map().prop_map(Step::Embed),
        (0usize..5).prop_map(Step::Delete),
        (0usize..5, attribute_map()).prop_map(|(n, a)| Step::Retain(n, a)),
    ]
}

fn image() -> Embed {
    let mut embed = Embed::new();
    embed.insert("image".to_string(), Value::String("cat.png".to_string()));
    embed
}

/// Run steps through the builder, clamping the retain/delete span to
/// `base_len` so the result is a well-formed edit over that base.
fn build_edit(base_len: usize, steps: Vec<Step>) -> Delta {
    let mut delta = Delta::new();
    let mut remaining = base_len;
    for step in steps {
        match step {
            Step::Insert(text, attrs) => delta = delta.insert(text, attrs),
            Step::Embed(attrs) => delta = delta.insert_embed(image(), attrs),
            Step::Delete(n) => {
                let n = n.min(remaining);
                remaining -= n;
                delta = delta.delete(n);
            }
            Step::Retain(n, attrs) => {
                let n = n.min(remaining);
                remaining -= n;
                delta = delta.retain(n, attrs);
            }
        }
    }
    delta
}

fn any_delta() -> impl Strategy<Value = Delta> {
    prop::collection::vec(step(), 0..10).prop_map(|steps| build_edit(usize::MAX, steps))
}

fn document() -> impl Strategy<Value = Delta> {
    prop::collection::vec(
        prop_oneof![
            ("[a-e]{1,4}", attribute_map()).prop_map(|(t, a)| Step::Insert(t, a)),
            attribute_map().prop_map(Step::Embed),
        ],
        0..6,
    )
    .prop_map(|steps| build_edit(0, steps))
}

fn edit_steps() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(step(), 0..8)
}

proptest! {
    #[test]
    fn length_is_additive(delta in any_delta()) {
        let total: usize = delta.ops().iter().map(Op::len).sum();
        prop_assert_eq!(delta.len(), total);
    }

    #[test]
    fn normalization_is_idempotent(delta in any_delta()) {
        let repushed = Delta::from_ops(delta.ops().to_vec());
        prop_assert_eq!(repushed.ops(), delta.ops());
    }

    #[test]
    fn no_zero_length_or_unmerged_adjacent_ops(delta in any_delta()) {
        for op in delta.ops() {
            prop_assert!(op.len() > 0);
        }
        for pair in delta.ops().windows(2) {
            match (&pair[0], &pair[1]) {
                (Op::Insert { attributes: a, .. }, Op::Insert { attributes: b, .. }) => {
                    prop_assert_ne!(a, b)
                }
                (Op::Delete { .. }, Op::Delete { .. }) => {
                    prop_assert!(false, "adjacent deletes left unmerged")
                }
                (Op::Retain { attributes: a, .. }, Op::Retain { attributes: b, .. }) => {
                    prop_assert_ne!(a, b)
                }
                _ => {}
            }
        }
    }

    #[test]
    fn compose_output_is_normalized(doc in document(), steps in edit_steps()) {
        let edit = build_edit(doc.len(), steps);
        let composed = doc.compose(&edit);
        for op in composed.ops() {
            prop_assert!(op.len() > 0);
        }
        let repushed = Delta::from_ops(composed.ops().to_vec());
        prop_assert_eq!(&repushed, &composed);
    }

    #[test]
    fn compose_length_law(doc in document(), steps in edit_steps()) {
        let edit = build_edit(doc.len(), steps);
        let deleted: usize = edit
            .ops()
            .iter()
            .filter_map(|op| match op {
                Op::Delete { len } => Some(*len),
                _ => None,
            })
            .sum();
        let inserted: usize = edit
            .ops()
            .iter()
            .filter(|op| op.kind() == OpKind::Insert)
            .map(Op::len)
            .sum();
        prop_assert_eq!(doc.compose(&edit).len(), doc.len() - deleted + inserted);
    }

    #[test]
    fn compose_is_associative(
        a in document(),
        steps_b in edit_steps(),
        steps_c in edit_steps(),
    ) {
        let b = build_edit(a.len(), steps_b);
        let ab = a.compose(&b);
        let c = build_edit(ab.len(), steps_c);
        prop_assert_eq!(ab.compose(&c), a.compose(&b.compose(&c)));
    }

    #[test]
    fn full_slice_is_identity(doc in document()) {
        prop_assert_eq!(doc.slice(0, doc.len()), doc);
    }

    #[test]
    fn slice_length_matches_requested_range(doc in document(), s in 0usize..20, e in 0usize..20) {
        prop_assume!(s <= e);
        let len = doc.len();
        prop_assert_eq!(doc.slice(s, e).len(), e.min(len) - s.min(len));
    }
}
