//! Chyby zostavovania saldo reportu.

/// Chyba pri načítaní zdrojov alebo zostavovaní reportu.
#[derive(thiserror::Error, Debug)]
pub enum SaldoError {
    /// Chyba vstupu-výstupu pri čítaní zdrojového súboru.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Chyba čítania CSV zdroja.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// V hlavičke zdroja sa nenašli povinné stĺpce. Výčet obsahuje
    /// všetky chýbajúce názvy, nie iba prvý.
    #[error("Source '{source_label}' is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        /// Označenie zdroja (šablóna, pomôcka, väzby).
        source_label: &'static str,
        /// Názvy všetkých nenájdených stĺpcov.
        columns: Vec<&'static str>,
    },
    /// Povinný parameter hlavičky reportu je po orezaní prázdny.
    #[error("Required report parameter '{field}' is blank")]
    BlankParameter {
        /// Názov prázdneho parametra.
        field: &'static str,
    },
}
