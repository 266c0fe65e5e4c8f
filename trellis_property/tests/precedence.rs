// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Precedence ordering and clear/restore behavior.

use proptest::prelude::*;
use trellis_property::{
    DependencyObject, DependencyObjectExt, ErasedValue, Precedence, Property,
    PropertyMetadataBuilder, PropertyRegistry, PropertyStore, ValueSource,
};

struct Elem {
    parent: Option<u32>,
    store: PropertyStore<u32>,
}

impl DependencyObject<u32> for Elem {
    fn property_store(&self) -> &PropertyStore<u32> {
        &self.store
    }

    fn property_store_mut(&mut self) -> &mut PropertyStore<u32> {
        &mut self.store
    }

    fn parent_key(&self) -> Option<u32> {
        self.parent
    }
}

fn setup() -> (PropertyRegistry, Property<i32>) {
    let mut registry = PropertyRegistry::new();
    let prop = registry.register(
        "Level",
        PropertyMetadataBuilder::new(-1_i32).inherits(true).build(),
    );
    (registry, prop)
}

fn effective(elem: &Elem, registry: &PropertyRegistry, prop: Property<i32>, inherited: Option<i32>) -> (i32, ValueSource) {
    let inherited = inherited.map(ErasedValue::new);
    let row = registry.get(prop.id()).unwrap();
    let (value, source) = elem.resolve_erased(row, prop.id(), inherited.as_ref());
    (*value.value().downcast_ref::<i32>().unwrap(), source)
}

#[test]
fn local_beats_styled_in_either_write_order() {
    let (registry, prop) = setup();
    for local_first in [true, false] {
        let mut elem = Elem {
            parent: None,
            store: PropertyStore::new(1),
        };
        let writes = if local_first {
            [(Precedence::Local, 1), (Precedence::Styled, 2)]
        } else {
            [(Precedence::Styled, 2), (Precedence::Local, 1)]
        };
        for (precedence, value) in writes {
            elem.set_value_notifying(&registry, prop, precedence, value, None);
        }
        assert_eq!(effective(&elem, &registry, prop, None), (1, ValueSource::Local));

        elem.set_value_notifying(&registry, prop, Precedence::Animated, 9, None);
        assert_eq!(effective(&elem, &registry, prop, None), (9, ValueSource::Animated));
        elem.clear_value_notifying(&registry, prop, Precedence::Animated, None);
        assert_eq!(effective(&elem, &registry, prop, None), (1, ValueSource::Local));
    }
}

#[test]
fn inherited_loses_to_styled_and_beats_default() {
    let (registry, prop) = setup();
    let mut elem = Elem {
        parent: Some(0),
        store: PropertyStore::new(1),
    };
    assert_eq!(effective(&elem, &registry, prop, None), (-1, ValueSource::Default));
    assert_eq!(
        effective(&elem, &registry, prop, Some(5)),
        (5, ValueSource::Inherited)
    );
    elem.set_value_notifying(&registry, prop, Precedence::Styled, 3, None);
    assert_eq!(effective(&elem, &registry, prop, Some(5)), (3, ValueSource::Styled));
}

fn level() -> impl Strategy<Value = Precedence> {
    prop_oneof![
        Just(Precedence::Styled),
        Just(Precedence::Local),
        Just(Precedence::Animated),
    ]
}

proptest! {
    #[test]
    fn clearing_every_level_restores_default(
        writes in proptest::collection::vec((level(), any::<i32>()), 0..24),
    ) {
        let (registry, prop) = setup();
        let mut elem = Elem { parent: None, store: PropertyStore::new(1) };
        for (precedence, value) in writes {
            elem.set_value_notifying(&registry, prop, precedence, value, None);
        }
        for precedence in Precedence::ALL {
            elem.clear_value_notifying(&registry, prop, precedence, None);
        }
        prop_assert_eq!(effective(&elem, &registry, prop, None), (-1, ValueSource::Default));
        prop_assert!(elem.store.is_empty());
    }

    #[test]
    fn highest_written_level_wins(
        writes in proptest::collection::vec((level(), any::<i32>()), 1..24),
    ) {
        let (registry, prop) = setup();
        let mut elem = Elem { parent: None, store: PropertyStore::new(1) };
        for &(precedence, value) in &writes {
            elem.set_value_notifying(&registry, prop, precedence, value, None);
        }
        let top = writes.iter().map(|(p, _)| *p).max().unwrap();
        let expected = writes.iter().rev().find(|(p, _)| *p == top).unwrap().1;
        prop_assert_eq!(effective(&elem, &registry, prop, None), (expected, ValueSource::from(top)));
    }
}
