//! Per-call binding of argument text onto one record instance.

use crate::{BindTarget, CommandProfile, FieldType, FieldValue, NamedArgSpec};

/// Applies tokenized input to the fields of one record instance.
///
/// A binder is created fresh for every parse call and owns the call's free
/// argument cursor; it is never shared or reused. The target instance starts
/// out populated with the profile's defaults.
pub struct Binder<'a> {
    profile: &'a CommandProfile,
    target: &'a mut dyn BindTarget,
    free_pos: usize,
    exhausted: bool,
}

impl<'a> Binder<'a> {
    /// Create a binder over a fresh record instance, assigning every
    /// declared field its default value.
    pub fn new(profile: &'a CommandProfile, target: &'a mut dyn BindTarget) -> Self {
        for (field, value) in profile.defaults() {
            target.set_field(*field, value.clone());
        }
        Binder {
            profile,
            target,
            free_pos: 0,
            exhausted: false,
        }
    }

    /// Access the entry of a named argument, if one is registered under
    /// `name`.
    pub fn named_entry<'b>(&'b mut self, name: &str) -> Option<NamedEntry<'b, 'a>> {
        let spec = self.profile.named_arg(name)?.clone();
        Some(NamedEntry { spec, binder: self })
    }

    /// Append the next free argument.
    ///
    /// At the list receptor the value is converted to the element type and
    /// appended; the cursor stays put, so the receptor keeps absorbing
    /// further values. At a scalar position the value is converted and
    /// assigned and the cursor advances. A failed conversion drops the token;
    /// only the missing-slot case reports `false`, and the caller must then
    /// give up the surrounding parse immediately.
    pub fn append_free_argument(&mut self, value: &str) -> bool {
        match self.profile.free_args().get(self.free_pos) {
            Some(spec) if spec.is_list_receptor() => {
                if let FieldType::Array(inner) = spec.field_type() {
                    if let Ok(v) = inner.extract(value) {
                        self.target.append_field(spec.field(), v);
                    }
                }
                true
            }
            Some(spec) => {
                if let Ok(v) = spec.field_type().extract(value) {
                    self.target.set_field(spec.field(), v);
                }
                self.free_pos += 1;
                true
            }
            None => {
                // Remaining free arguments have nowhere to go and there is no
                // list receptor.
                log::warn!(
                    "no free argument position left in {:?} for {:?}",
                    self.profile.name(),
                    value
                );
                self.exhausted = true;
                false
            }
        }
    }

    /// Whether a free argument arrived after every declared position was
    /// already filled. A parse that saw this must not hand back its instance.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Entry to one named argument of the bound record.
pub struct NamedEntry<'b, 'a> {
    spec: NamedArgSpec,
    binder: &'b mut Binder<'a>,
}

impl NamedEntry<'_, '_> {
    /// True if the current entry is a switch.
    pub fn is_switch(&self) -> bool {
        self.spec.is_switch()
    }

    /// Turn a switch on.
    ///
    /// Fails if the entry is not a switch; it might be a named argument, and
    /// `inject` should be tried instead.
    pub fn switch_on(&mut self) -> bool {
        self.spec.is_switch()
            && self
                .binder
                .target
                .set_field(self.spec.field(), FieldValue::Bool(true))
    }

    /// Convert `value` to the field's type and assign it.
    ///
    /// Fails if the entry is a switch or the conversion fails; a failed
    /// conversion leaves the field untouched.
    pub fn inject(&mut self, value: &str) -> bool {
        if self.spec.is_switch() {
            return false;
        }
        match self.spec.field_type().extract(value) {
            Ok(v) => self.binder.target.set_field(self.spec.field(), v),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SimpleSyntax;
    use crate::{FieldId, FieldSpec};
    use std::sync::Arc;

    #[derive(Debug, Default, PartialEq)]
    struct Stat {
        machine: String,
        detail: bool,
        minutes: i64,
        tags: Vec<String>,
    }

    impl BindTarget for Stat {
        fn set_field(&mut self, field: FieldId, value: FieldValue) -> bool {
            match field {
                0 => match value.try_into() {
                    Ok(v) => {
                        self.machine = v;
                        true
                    }
                    Err(_) => false,
                },
                1 => match value.try_into() {
                    Ok(v) => {
                        self.detail = v;
                        true
                    }
                    Err(_) => false,
                },
                2 => match value.try_into() {
                    Ok(v) => {
                        self.minutes = v;
                        true
                    }
                    Err(_) => false,
                },
                3 => match value.try_into() {
                    Ok(v) => {
                        self.tags = v;
                        true
                    }
                    Err(_) => false,
                },
                _ => false,
            }
        }

        fn append_field(&mut self, field: FieldId, value: FieldValue) -> bool {
            match field {
                3 => match value.try_into() {
                    Ok(v) => {
                        self.tags.push(v);
                        true
                    }
                    Err(_) => false,
                },
                _ => false,
            }
        }
    }

    fn stat_profile() -> CommandProfile {
        CommandProfile::from_parts(
            "Stat",
            None,
            "",
            vec![
                FieldSpec::named("machine", FieldType::Text).with_abbrev('m').with_name("machine"),
                FieldSpec::named("detail", FieldType::Bool).with_switch(),
                FieldSpec::free("minutes", FieldType::I64).with_default(40i64),
                FieldSpec::free("tags", FieldType::Array(Box::new(FieldType::Text))),
            ],
            Arc::new(SimpleSyntax),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_are_applied_on_construction() {
        let profile = stat_profile();
        let mut stat = Stat {
            machine: "stale".into(),
            detail: true,
            minutes: 7,
            tags: vec!["old".into()],
        };
        Binder::new(&profile, &mut stat);
        assert_eq!(stat, Stat {
            machine: String::new(),
            detail: false,
            minutes: 40,
            tags: Vec::new(),
        });
    }

    #[test]
    fn test_named_entry_switch_and_inject() {
        let profile = stat_profile();
        let mut stat = Stat::default();
        let mut binder = Binder::new(&profile, &mut stat);

        assert!(binder.named_entry("missing").is_none());

        let mut detail = binder.named_entry("detail").unwrap();
        assert!(detail.is_switch());
        // A switch cannot be injected, only turned on.
        assert!(!detail.inject("whatever"));
        assert!(detail.switch_on());

        let mut machine = binder.named_entry("m").unwrap();
        assert!(!machine.is_switch());
        assert!(!machine.switch_on());
        assert!(machine.inject("left-dry"));

        assert!(stat.detail);
        assert_eq!(stat.machine, "left-dry");
    }

    #[test]
    fn test_inject_conversion_failure_leaves_field_untouched() {
        let profile = CommandProfile::from_parts(
            "X",
            None,
            "",
            vec![FieldSpec::named("minutes", FieldType::I64).with_default(40i64)],
            Arc::new(SimpleSyntax),
        )
        .unwrap();

        #[derive(Default)]
        struct OnlyMinutes {
            minutes: i64,
        }
        impl BindTarget for OnlyMinutes {
            fn set_field(&mut self, field: FieldId, value: FieldValue) -> bool {
                match field {
                    0 => match value.try_into() {
                        Ok(v) => {
                            self.minutes = v;
                            true
                        }
                        Err(_) => false,
                    },
                    _ => false,
                }
            }
            fn append_field(&mut self, _field: FieldId, _value: FieldValue) -> bool {
                false
            }
        }

        let mut rec = OnlyMinutes::default();
        let mut binder = Binder::new(&profile, &mut rec);
        let mut entry = binder.named_entry("minutes").unwrap();
        assert!(!entry.inject("soon"));
        assert_eq!(rec.minutes, 40);
    }

    #[test]
    fn test_free_argument_cursor_and_receptor() {
        let profile = stat_profile();
        let mut stat = Stat::default();
        let mut binder = Binder::new(&profile, &mut stat);

        // Scalar position, then the receptor absorbs everything after it.
        assert!(binder.append_free_argument("30"));
        assert!(binder.append_free_argument("a"));
        assert!(binder.append_free_argument("b"));
        assert!(binder.append_free_argument("c"));
        assert!(!binder.is_exhausted());

        assert_eq!(stat.minutes, 30);
        assert_eq!(stat.tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_free_argument_conversion_failure_is_swallowed() {
        let profile = stat_profile();
        let mut stat = Stat::default();
        let mut binder = Binder::new(&profile, &mut stat);

        // The token is dropped but the position is consumed.
        assert!(binder.append_free_argument("soon"));
        assert!(binder.append_free_argument("x"));
        assert_eq!(stat.minutes, 40);
        assert_eq!(stat.tags, vec!["x"]);
    }

    #[test]
    fn test_exhaustion_without_receptor() {
        let profile = CommandProfile::from_parts(
            "X",
            None,
            "",
            vec![
                FieldSpec::free("machine", FieldType::Text),
                FieldSpec::free("minutes", FieldType::I64),
            ],
            Arc::new(SimpleSyntax),
        )
        .unwrap();

        let mut stat = Stat::default();
        let mut binder = Binder::new(&profile, &mut stat);
        assert!(binder.append_free_argument("left-dry"));
        assert!(binder.append_free_argument("30"));
        assert!(!binder.append_free_argument("extra"));
        assert!(binder.is_exhausted());
    }
}
