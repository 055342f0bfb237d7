//! Compilation of declared field metadata into an immutable command profile.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::syntax::{split_field_ident, split_symbol_name, SyntaxProvider};
use crate::{ArgumentPack, CommandRecord, FieldType, FieldValue, SchemaError};

/// Opaque handle to one declared field: the index of its [`FieldSpec`] in
/// declaration order.
pub type FieldId = usize;

/// Declared metadata of one argument field — the registration unit the
/// profile compiler consumes. Usually generated by `#[derive(Command)]`,
/// but can be built by hand for records that want full control.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    ident: &'static str,
    r#type: FieldType,
    free: bool,
    name: Option<&'static str>,
    abbrev: Option<char>,
    switch: bool,
    default: Option<FieldValue>,
    doc: &'static str,
}

impl FieldSpec {
    /// Declare a named argument field.
    ///
    /// # Arguments
    /// * `ident` - The field's declared identifier, e.g. `"machine_name"`
    /// * `r#type` - The field's type
    pub fn named(ident: &'static str, r#type: FieldType) -> Self {
        Self {
            ident,
            r#type,
            free: false,
            name: None,
            abbrev: None,
            switch: false,
            default: None,
            doc: "",
        }
    }

    /// Declare a free (positional) argument field.
    pub fn free(ident: &'static str, r#type: FieldType) -> Self {
        Self {
            ident,
            r#type,
            free: true,
            name: None,
            abbrev: None,
            switch: false,
            default: None,
            doc: "",
        }
    }

    /// Set an explicit full name, overriding auto-naming.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Set a single-letter abbreviation.
    pub fn with_abbrev(mut self, abbrev: char) -> Self {
        self.abbrev = Some(abbrev);
        self
    }

    /// Mark the field as a switch. Switch fields must be boolean.
    pub fn with_switch(mut self) -> Self {
        self.switch = true;
        self
    }

    /// Set the default value used when there is no explicit assignment.
    pub fn with_default(mut self, default: impl Into<FieldValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the documentation text.
    pub fn with_doc(mut self, doc: &'static str) -> Self {
        self.doc = doc;
        self
    }
}

/// Description of a named argument.
#[derive(Debug, Clone)]
pub struct NamedArgSpec {
    name: String,
    switch: bool,
    field: FieldId,
    r#type: FieldType,
}

impl NamedArgSpec {
    /// The canonical name this entry is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_switch(&self) -> bool {
        self.switch
    }

    pub fn field(&self) -> FieldId {
        self.field
    }

    pub fn field_type(&self) -> &FieldType {
        &self.r#type
    }
}

/// Description of a free argument.
#[derive(Debug, Clone)]
pub struct FreeArgSpec {
    position: usize,
    list_receptor: bool,
    field: FieldId,
    r#type: FieldType,
}

impl FreeArgSpec {
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether this position absorbs all remaining free arguments.
    pub fn is_list_receptor(&self) -> bool {
        self.list_receptor
    }

    pub fn field(&self) -> FieldId {
        self.field
    }

    pub fn field_type(&self) -> &FieldType {
        &self.r#type
    }
}

/// One argument's documentation fragment.
struct Documentation {
    name: Option<String>,
    abbrev: Option<String>,
    description: &'static str,
}

/// Profile of a command: how literal arguments map onto record fields.
///
/// A profile is compiled once per record type and syntax provider and is
/// immutable afterwards, so it can be shared freely between concurrently
/// executing parses.
#[derive(Clone)]
pub struct CommandProfile {
    name: String,
    docs: String,
    provider: Arc<dyn SyntaxProvider>,
    named_args: BTreeMap<String, NamedArgSpec>,
    free_args: Vec<FreeArgSpec>,
    defaults: BTreeMap<FieldId, FieldValue>,
}

impl fmt::Debug for CommandProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandProfile")
            .field("name", &self.name)
            .field("named_args", &self.named_args)
            .field("free_args", &self.free_args)
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl CommandProfile {
    /// Compile the profile of a record type under a syntax provider.
    pub fn compile<T: CommandRecord>(
        provider: Arc<dyn SyntaxProvider>,
    ) -> Result<Self, SchemaError> {
        Self::from_parts(
            T::declared_name(),
            T::command_name(),
            T::doc(),
            T::field_specs(),
            provider,
        )
    }

    /// Compile a profile from explicitly registered parts.
    ///
    /// Specs are processed in declaration order. Construction fails on any
    /// schema invariant violation: a switch on a non-boolean field, a field
    /// type outside the closed set, an array anywhere but the last free
    /// argument, or a default that does not match its field type.
    pub fn from_parts(
        declared_name: &str,
        explicit_name: Option<&str>,
        doc: &str,
        specs: Vec<FieldSpec>,
        provider: Arc<dyn SyntaxProvider>,
    ) -> Result<Self, SchemaError> {
        let raw_name = explicit_name.unwrap_or(declared_name);
        let name = provider.name_command(&split_symbol_name(raw_name));

        let mut named_args: BTreeMap<String, NamedArgSpec> = BTreeMap::new();
        let mut free_args: Vec<FreeArgSpec> = Vec::new();
        let mut defaults: BTreeMap<FieldId, FieldValue> = BTreeMap::new();
        let mut docs: Vec<Documentation> = Vec::new();

        for (field, spec) in specs.iter().enumerate() {
            spec.r#type.check_supported()?;

            if spec.free {
                if free_args.last().is_some_and(FreeArgSpec::is_list_receptor) {
                    return Err(SchemaError::ListReceptor(format!(
                        "free argument {:?} declared after the list receptor; \
                         only one receptor is allowed and it must be last",
                        spec.ident
                    )));
                }
                let list_receptor = matches!(spec.r#type, FieldType::Array(_));
                free_args.push(FreeArgSpec {
                    position: free_args.len(),
                    list_receptor,
                    field,
                    r#type: spec.r#type.clone(),
                });
                docs.push(Documentation {
                    name: Some(format!("(Free#{})", free_args.len())),
                    abbrev: None,
                    description: spec.doc,
                });
            } else {
                if spec.switch && spec.r#type != FieldType::Bool {
                    return Err(SchemaError::Switch(format!(
                        "switch argument {:?} must be boolean, got {:?}",
                        spec.ident, spec.r#type
                    )));
                }
                if matches!(spec.r#type, FieldType::Array(_)) {
                    return Err(SchemaError::FieldType(format!(
                        "named argument {:?} cannot be an array; arrays are \
                         only supported on the last free argument",
                        spec.ident
                    )));
                }

                let mut entry_doc = Documentation {
                    name: None,
                    abbrev: None,
                    description: spec.doc,
                };
                let mut need_auto_name = true;
                if let Some(c) = spec.abbrev {
                    let nm = provider.name_argument(&[c.to_string()]);
                    named_args.insert(
                        nm.clone(),
                        NamedArgSpec {
                            name: nm.clone(),
                            switch: spec.switch,
                            field,
                            r#type: spec.r#type.clone(),
                        },
                    );
                    need_auto_name = false;
                    entry_doc.abbrev = Some(nm);
                }
                if let Some(n) = spec.name {
                    let nm = provider.name_argument(&split_field_ident(n));
                    named_args.insert(
                        nm.clone(),
                        NamedArgSpec {
                            name: nm.clone(),
                            switch: spec.switch,
                            field,
                            r#type: spec.r#type.clone(),
                        },
                    );
                    need_auto_name = false;
                    entry_doc.name = Some(nm);
                }
                // Without a user-defined name the argument is named after its
                // declared identifier.
                if need_auto_name {
                    let nm = provider.name_argument(&split_field_ident(spec.ident));
                    named_args.insert(
                        nm.clone(),
                        NamedArgSpec {
                            name: nm.clone(),
                            switch: spec.switch,
                            field,
                            r#type: spec.r#type.clone(),
                        },
                    );
                    entry_doc.name = Some(nm);
                }
                docs.push(entry_doc);
            }

            let default = match &spec.default {
                Some(v) => {
                    spec.r#type.validate(v).map_err(|err| {
                        SchemaError::Default(format!("{:?}: {}", spec.ident, err))
                    })?;
                    v.clone()
                }
                None => spec.r#type.zero_value(),
            };
            defaults.insert(field, default);
        }

        let docs = render_docs(doc, &name, &docs);
        log::debug!(
            "compiled command profile {:?}: {} named, {} free",
            name,
            named_args.len(),
            free_args.len()
        );
        Ok(CommandProfile {
            name,
            docs,
            provider,
            named_args,
            free_args,
            defaults,
        })
    }

    /// The canonical command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pre-rendered usage text.
    pub fn docs(&self) -> &str {
        &self.docs
    }

    pub fn provider(&self) -> &Arc<dyn SyntaxProvider> {
        &self.provider
    }

    /// Look up a named argument by its canonical name.
    pub fn named_arg(&self, name: &str) -> Option<&NamedArgSpec> {
        self.named_args.get(name)
    }

    /// All free argument positions, in order.
    pub fn free_args(&self) -> &[FreeArgSpec] {
        &self.free_args
    }

    /// Whether the last free argument absorbs all remaining bare tokens.
    pub fn has_list_receptor(&self) -> bool {
        self.free_args.last().is_some_and(FreeArgSpec::is_list_receptor)
    }

    /// Defaults every fresh record instance starts from.
    pub fn defaults(&self) -> &BTreeMap<FieldId, FieldValue> {
        &self.defaults
    }

    /// Whether the pack's command name is exactly this profile's name.
    ///
    /// An empty pack never matches.
    pub fn match_pack(&self, args: &ArgumentPack) -> bool {
        args.name() == Some(self.name.as_str())
    }

    /// Whether raw text starts with this profile's name under the syntax
    /// provider's equality.
    ///
    /// The comparison covers a prefix of exactly the name's length; text
    /// shorter than the name never matches. Used to preview transport-level
    /// message content before committing to full tokenization.
    pub fn match_text(&self, text: &str) -> bool {
        let name_len = self.name.chars().count();
        let prefix: String = text.chars().take(name_len).collect();
        prefix.chars().count() == name_len && self.provider.syntactic_equal(&prefix, &self.name)
    }
}

fn render_docs(description: &str, name: &str, docs: &[Documentation]) -> String {
    let mut rv = String::new();
    rv.push_str(description);
    rv.push('\n');
    rv.push_str("USAGE: ");
    rv.push_str(name);
    rv.push_str(" OPTIONS\n");
    rv.push_str("OPTIONS:\n");
    for doc in docs {
        match (&doc.abbrev, &doc.name) {
            (Some(abbrev), Some(name)) => {
                rv.push_str(&format!("  {}, {} {}\n", abbrev, name, doc.description));
            }
            (Some(abbrev), None) => {
                rv.push_str(&format!("  {} {}\n", abbrev, doc.description));
            }
            (None, Some(name)) => {
                rv.push_str(&format!("  {} {}\n", name, doc.description));
            }
            (None, None) => {}
        }
    }
    rv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SimpleSyntax;

    fn provider() -> Arc<dyn SyntaxProvider> {
        Arc::new(SimpleSyntax)
    }

    fn laundry_specs() -> Vec<FieldSpec> {
        vec![
            FieldSpec::free("verb", FieldType::Text)
                .with_default("")
                .with_doc("`occupy`, or `help` to print this message."),
            FieldSpec::free("machine", FieldType::Text)
                .with_default("")
                .with_doc("`left-dry`, `right-dry`, `left-wash` or `right-wash`."),
            FieldSpec::free("minutes", FieldType::I64).with_default(40i64),
        ]
    }

    #[test]
    fn test_compile_laundry_profile() {
        let profile = CommandProfile::from_parts(
            "LaundryCommand",
            Some("Laundry"),
            "Laundry occupancy manager.",
            laundry_specs(),
            provider(),
        )
        .unwrap();

        assert_eq!(profile.name(), "/laundry");
        assert_eq!(profile.free_args().len(), 3);
        assert!(!profile.has_list_receptor());
        assert_eq!(profile.free_args()[1].position(), 1);
        assert_eq!(profile.free_args()[1].field(), 1);

        assert_eq!(profile.defaults()[&0], FieldValue::Text(String::new()));
        assert_eq!(profile.defaults()[&2], FieldValue::I64(40));
    }

    #[test]
    fn test_command_name_from_declared_identifier() {
        let profile = CommandProfile::from_parts(
            "DBAdmin",
            None,
            "",
            vec![FieldSpec::free("target", FieldType::Text)],
            provider(),
        )
        .unwrap();
        assert_eq!(profile.name(), "/db-admin");
    }

    #[test]
    fn test_named_argument_registration() {
        let specs = vec![
            FieldSpec::named("machine_name", FieldType::Text)
                .with_abbrev('m')
                .with_name("machine"),
            FieldSpec::named("detail", FieldType::Bool).with_switch(),
            FieldSpec::named("count", FieldType::I64).with_abbrev('c'),
        ];
        let profile =
            CommandProfile::from_parts("StatCommand", Some("Stat"), "", specs, provider()).unwrap();

        // Abbreviation and explicit full name both registered for the same
        // field.
        let by_abbrev = profile.named_arg("m").unwrap();
        let by_name = profile.named_arg("machine").unwrap();
        assert_eq!(by_abbrev.field(), by_name.field());
        assert!(!by_name.is_switch());

        // Auto-naming only applies when neither abbreviation nor explicit
        // name is given.
        let detail = profile.named_arg("detail").unwrap();
        assert!(detail.is_switch());
        assert_eq!(detail.field_type(), &FieldType::Bool);
        assert!(profile.named_arg("c").is_some());
        assert!(profile.named_arg("count").is_none());

        assert!(profile.named_arg("unknown").is_none());
    }

    #[test]
    fn test_abbreviation_keeps_declared_case() {
        let specs = vec![FieldSpec::named("dump", FieldType::Text).with_abbrev('D')];
        let profile = CommandProfile::from_parts("X", None, "", specs, provider()).unwrap();
        assert!(profile.named_arg("D").is_some());
        assert!(profile.named_arg("d").is_none());
    }

    #[test]
    fn test_name_collision_last_registration_wins() {
        let specs = vec![
            FieldSpec::named("target", FieldType::Text),
            FieldSpec::named("other", FieldType::I64).with_name("target"),
        ];
        let profile = CommandProfile::from_parts("X", None, "", specs, provider()).unwrap();
        let spec = profile.named_arg("target").unwrap();
        assert_eq!(spec.field(), 1);
        assert_eq!(spec.field_type(), &FieldType::I64);
    }

    #[test]
    fn test_switch_must_be_boolean() {
        let specs = vec![FieldSpec::named("detail", FieldType::Text).with_switch()];
        assert!(matches!(
            CommandProfile::from_parts("X", None, "", specs, provider()),
            Err(SchemaError::Switch(_))
        ));
    }

    #[test]
    fn test_receptor_must_be_last() {
        let specs = vec![
            FieldSpec::free("files", FieldType::Array(Box::new(FieldType::Text))),
            FieldSpec::free("target", FieldType::Text),
        ];
        assert!(matches!(
            CommandProfile::from_parts("X", None, "", specs, provider()),
            Err(SchemaError::ListReceptor(_))
        ));
    }

    #[test]
    fn test_only_one_receptor_allowed() {
        let specs = vec![
            FieldSpec::free("files", FieldType::Array(Box::new(FieldType::Text))),
            FieldSpec::free("more", FieldType::Array(Box::new(FieldType::Text))),
        ];
        assert!(matches!(
            CommandProfile::from_parts("X", None, "", specs, provider()),
            Err(SchemaError::ListReceptor(_))
        ));
    }

    #[test]
    fn test_receptor_as_only_free_argument_is_fine() {
        let specs = vec![FieldSpec::free(
            "files",
            FieldType::Array(Box::new(FieldType::Text)),
        )];
        let profile = CommandProfile::from_parts("X", None, "", specs, provider()).unwrap();
        assert!(profile.has_list_receptor());
    }

    #[test]
    fn test_named_array_is_rejected() {
        let specs = vec![FieldSpec::named(
            "files",
            FieldType::Array(Box::new(FieldType::Text)),
        )];
        assert!(matches!(
            CommandProfile::from_parts("X", None, "", specs, provider()),
            Err(SchemaError::FieldType(_))
        ));
    }

    #[test]
    fn test_default_must_match_field_type() {
        let specs = vec![FieldSpec::free("minutes", FieldType::I64).with_default("40")];
        assert!(matches!(
            CommandProfile::from_parts("X", None, "", specs, provider()),
            Err(SchemaError::Default(_))
        ));
    }

    #[test]
    fn test_match_pack_is_exact() {
        let profile =
            CommandProfile::from_parts("Laundry", None, "", laundry_specs(), provider()).unwrap();
        assert!(profile.match_pack(&ArgumentPack::tokenize("/laundry occupy").unwrap()));
        assert!(!profile.match_pack(&ArgumentPack::tokenize("/Laundry occupy").unwrap()));
        assert!(!profile.match_pack(&ArgumentPack::tokenize("").unwrap()));
    }

    #[test]
    fn test_match_text_is_prefix_and_syntactic() {
        let profile =
            CommandProfile::from_parts("Laundry", None, "", laundry_specs(), provider()).unwrap();
        assert!(profile.match_text("/laundry occupy left-dry"));
        assert!(profile.match_text("/LAUNDRY"));
        assert!(!profile.match_text("/laundr"));
        assert!(!profile.match_text("laundry"));
    }

    #[test]
    fn test_docs_rendering() {
        let specs = vec![
            FieldSpec::named("machine_name", FieldType::Text)
                .with_abbrev('m')
                .with_name("machine_name")
                .with_doc("Machine to inspect."),
            FieldSpec::free("verb", FieldType::Text).with_doc("What to do."),
        ];
        let profile = CommandProfile::from_parts(
            "StatCommand",
            Some("Stat"),
            "Machine status.",
            specs,
            provider(),
        )
        .unwrap();

        let docs = profile.docs();
        assert!(docs.starts_with("Machine status.\n"));
        assert!(docs.contains("USAGE: /stat OPTIONS\n"));
        assert!(docs.contains("OPTIONS:\n"));
        assert!(docs.contains("  m, machine-name Machine to inspect.\n"));
        assert!(docs.contains("  (Free#1) What to do.\n"));
    }
}
