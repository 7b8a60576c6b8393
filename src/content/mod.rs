mod article;
mod identifier;
mod issue;
mod journal;

#[cfg(test)]
pub(crate) mod testing;

pub use self::{
    article::{Abstract, Article, HtmlRendition, PdfRendition, SupplementaryMaterial},
    identifier::{IdentifierSet, PidKind, PidNormalizer, ScieloPids},
    issue::{Issue, IssueType},
    journal::Journal,
};
