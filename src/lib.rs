#![warn(missing_docs)]
//! Knižnica na rekonciliáciu pohybov fakturačného účtu so šablónou salda:
//! dohľadanie stĺpcov podľa hlavičiek, prevod označení pôvodu na typy
//! dokladov, prepis dátovej oblasti, priebežný zostatok, doplnkové
//! referencie faktúr a projekcia na zobraziteľné riadky.

mod error;
mod header;
mod ledger;
mod lookup;
mod project;
mod report;
mod table;
mod types;
mod utils;

pub use crate::error::SaldoError;
pub use crate::header::{
    HelperColumns, ISSUED_HEADER, MovementColumns, ReferenceColumns, TemplateColumns, find_exact,
    find_normalized,
};
pub use crate::lookup::{DocTypeMap, REFERENCE_PREFIX, ReferenceMap};
pub use crate::report::{
    DEFAULT_COMPANY, SaldoBuilder, SaldoInputs, SaldoReport, TEMPLATE_HEADER_ROW,
};
pub use crate::table::{Cell, Sheet};
pub use crate::types::*;
pub use crate::utils::{normalize, sniff_image};
