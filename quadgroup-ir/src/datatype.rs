//! Literal datatypes.

use std::fmt;
use std::sync::Arc;

use quadgroup_vocab::{rdf, xsd};
use serde::{Deserialize, Serialize};

/// Expanded datatype IRI carried by every literal.
///
/// Plain strings are `xsd:string` and language-tagged strings are
/// `rdf:langString`; there is no "untyped" literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Datatype(Arc<str>);

impl Datatype {
    pub fn from_iri(iri: impl AsRef<str>) -> Self {
        Datatype(Arc::from(iri.as_ref()))
    }

    pub fn xsd_string() -> Self {
        Self::from_iri(xsd::STRING)
    }

    pub fn xsd_boolean() -> Self {
        Self::from_iri(xsd::BOOLEAN)
    }

    pub fn xsd_integer() -> Self {
        Self::from_iri(xsd::INTEGER)
    }

    pub fn xsd_decimal() -> Self {
        Self::from_iri(xsd::DECIMAL)
    }

    pub fn xsd_double() -> Self {
        Self::from_iri(xsd::DOUBLE)
    }

    pub fn xsd_date() -> Self {
        Self::from_iri(xsd::DATE)
    }

    pub fn rdf_lang_string() -> Self {
        Self::from_iri(rdf::LANG_STRING)
    }

    pub fn as_iri(&self) -> &str {
        &self.0
    }

    pub fn is_xsd_string(&self) -> bool {
        self.as_iri() == xsd::STRING
    }

    pub fn is_lang_string(&self) -> bool {
        self.as_iri() == rdf::LANG_STRING
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_iri())
    }
}
