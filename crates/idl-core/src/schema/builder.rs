use super::{Result, Types};

/// Options for turning a parsed program into one ready for code generation.
///
/// Building runs the implicit key assignment pass followed by verification.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Builder {
    /// Accept explicit negative field keys
    allow_negative_keys: bool,

    /// Reject fields declared without a key instead of auto-assigning one
    strict: bool,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_negative_keys(&mut self, allow: bool) -> &mut Self {
        self.allow_negative_keys = allow;
        self
    }

    pub fn strict(&mut self, strict: bool) -> &mut Self {
        self.strict = strict;
        self
    }

    pub fn allows_negative_keys(&self) -> bool {
        self.allow_negative_keys
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn build(&self, mut types: Types) -> Result<Types> {
        tracing::debug!(
            types = types.len(),
            strict = self.strict,
            allow_negative_keys = self.allow_negative_keys,
            "building schema"
        );

        types.assign_keys(self)?;
        types.verify(self)?;

        Ok(types)
    }
}
