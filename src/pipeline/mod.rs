//! Markdown scanners.
//!
//! Each submodule is a leaf: it takes the text of one document and returns
//! a typed record, never failing. Only [`input`] does I/O.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ sections ──▶ records        (Japanese documents)
//!       ──▶ personal                    (personal.md)
//!       ──▶ extract                     (header, footer, summary cards)
//! ```
//!
//! 1. [`input`]: read a document as UTF-8 text
//! 2. [`scan`]: line classification and the regexes every scanner shares
//! 3. [`sections`]: generic `# section` / `## subsection` tree
//! 4. [`records`]: typed records picked out of a section tree
//! 5. [`personal`]: the English-keyed `personal.md` scanner
//! 6. [`extract`]: label-driven extractors for single values and summaries

pub mod extract;
pub mod input;
pub mod personal;
pub mod records;
pub mod scan;
pub mod sections;
