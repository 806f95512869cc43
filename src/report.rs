//! Zostavenie celého saldo reportu nad štyrmi tabuľkovými zdrojmi.

use crate::error::SaldoError;
use crate::header::{HelperColumns, MovementColumns, ReferenceColumns, TemplateColumns};
use crate::ledger;
use crate::lookup::{DocTypeMap, ReferenceMap};
use crate::project;
use crate::table::{Cell, Sheet};
use crate::types::{LedgerRow, ProjectedReport, Theme};
use log::debug;

/// Riadok hlavičky, na ktorom majú dodávané šablóny názvy stĺpcov.
pub const TEMPLATE_HEADER_ROW: u32 = 9;

/// Predvolený názov spoločnosti v hlavičke reportu.
pub const DEFAULT_COMPANY: &str = "SWAN a.s.";

/// Štyri tabuľkové zdroje jedného behu.
///
/// Beh je bezstavový a jednopriechodový; pri zapojení do súbežného
/// hostiteľa musí každá požiadavka dostať vlastné kópie zdrojov, nič tu
/// nie je stavané na zdieľanú mutáciu.
#[derive(Debug, Clone)]
pub struct SaldoInputs {
    /// Šablóna reportu (hlavička typicky na riadku [`TEMPLATE_HEADER_ROW`]).
    pub template: Sheet,
    /// Pomôcka s prevodom označení pôvodu na typy dokladov.
    pub helper: Sheet,
    /// Pohyby fakturačného účtu.
    pub movements: Sheet,
    /// Väzby s doplnkovými referenciami k dokladom.
    pub references: Sheet,
}

/// Hotový saldo report: prepísaná šablóna pre serializačného kolaboranta
/// a plochá projekcia pre vykresľovacieho kolaboranta. Chybný beh nikdy
/// nevracia čiastočný výsledok.
#[derive(Debug, Clone)]
pub struct SaldoReport {
    /// Šablóna s prepísanou dátovou oblasťou, vzorcami zostatku,
    /// súčtovým blokom a hlavičkovými bunkami.
    pub sheet: Sheet,
    /// Pozície stĺpcov šablóny vrátane stĺpcov označených na zalomené
    /// záhlavie.
    pub columns: TemplateColumns,
    /// Posledný dátový riadok saldokonta.
    pub last_row: u32,
    /// Riadok súčtového bloku, pokiaľ sa zapisoval.
    pub summary_row: Option<u32>,
    /// Typované dátové riadky s priebežným zostatkom.
    pub ledger: Vec<LedgerRow>,
    /// Plochá projekcia so sformátovanými hodnotami a celkovým zostatkom.
    pub projection: ProjectedReport,
    /// Bajty loga bez zmeny, pokiaľ boli dodané.
    pub logo: Option<Vec<u8>>,
}

/// Builder saldo reportu: povinné parametre hlavičky pri vytvorení,
/// voliteľné cez settery.
///
/// # Príklad
///
/// ```
/// # use saldo_report::{SaldoBuilder, SaldoInputs, Sheet, Theme};
/// # let inputs = SaldoInputs {
/// #     template: Sheet::new(9),
/// #     helper: Sheet::new(1),
/// #     movements: Sheet::new(1),
/// #     references: Sheet::new(1),
/// # };
/// let report = SaldoBuilder::new(inputs, "Ján Novák", "1002003", "800123")
///     .theme(Theme::Warm)
///     .generate();
/// // Prázdna šablóna nemá povinné stĺpce, beh skončí chybou.
/// assert!(report.is_err());
/// ```
#[derive(Debug)]
pub struct SaldoBuilder {
    inputs: SaldoInputs,
    customer_name: String,
    sap_id: String,
    contract_account: String,
    company: String,
    theme: Theme,
    logo: Option<Vec<u8>>,
}

impl SaldoBuilder {
    /// Vytvorí builder nad zdrojmi s povinnými parametrami hlavičky:
    /// meno zákazníka, SAP ID a číslo zmluvného účtu.
    #[must_use]
    pub fn new(inputs: SaldoInputs, customer_name: &str, sap_id: &str, contract_account: &str) -> Self {
        Self {
            inputs,
            customer_name: customer_name.to_string(),
            sap_id: sap_id.to_string(),
            contract_account: contract_account.to_string(),
            company: DEFAULT_COMPANY.to_string(),
            theme: Theme::default(),
            logo: None,
        }
    }

    /// Nastaví názov spoločnosti; prázdny padá späť na [`DEFAULT_COMPANY`].
    #[must_use]
    pub fn company(mut self, company: &str) -> Self {
        self.company = company.to_string();
        self
    }

    /// Nastaví vizuálnu tému reportu.
    #[must_use]
    pub const fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Priloží bajty loga; report ich odovzdá kolaborantom bez zmeny.
    #[must_use]
    pub fn logo(mut self, bytes: Vec<u8>) -> Self {
        self.logo = Some(bytes);
        self
    }

    /// Zostaví report v poradí: stĺpce šablóny, prevodová tabuľka,
    /// prepis dátovej oblasti, vzorce zostatku so súčtovým blokom,
    /// referencie faktúr, hlavičkové bunky, projekcia.
    pub fn generate(self) -> Result<SaldoReport, SaldoError> {
        let Self {
            inputs,
            customer_name,
            sap_id,
            contract_account,
            company,
            theme,
            logo,
        } = self;

        let customer_name = required_param(&customer_name, "Meno zákazníka")?;
        let sap_id = required_param(&sap_id, "SAP ID")?;
        let contract_account = required_param(&contract_account, "Zmluvný účet")?;
        let company = {
            let trimmed = company.trim();
            if trimmed.is_empty() {
                DEFAULT_COMPANY.to_string()
            } else {
                trimmed.to_string()
            }
        };

        let SaldoInputs {
            mut template,
            helper,
            movements,
            references,
        } = inputs;

        let columns = TemplateColumns::resolve(&mut template)?;
        let helper_columns = HelperColumns::resolve(&helper)?;
        let doc_types = DocTypeMap::from_sheet(&helper, &helper_columns);
        let movement_columns = MovementColumns::resolve(&movements);

        let written = ledger::populate(
            &mut template,
            &columns,
            &movements,
            &movement_columns,
            &doc_types,
        );
        debug!("ledger rebuilt with {written} rows");

        let last_row = ledger::last_data_row(&template, columns.document);
        ledger::write_balances(&mut template, &columns, last_row);
        let summary_row = ledger::write_total_summary(&mut template, &columns, last_row);

        let reference_columns = ReferenceColumns::resolve(&references)?;
        let reference_map = ReferenceMap::from_sheet(&references, &reference_columns);
        ledger::annotate_references(&mut template, &columns, last_row, &reference_map);

        template.set_cell(1, 2, Cell::Text(sap_id));
        template.set_cell(2, 2, Cell::Text(customer_name));
        template.set_cell(3, 2, Cell::Text(company));
        template.set_cell(4, 2, Cell::Text(contract_account));

        let ledger_rows = project::read_ledger(&template, &columns, last_row);
        let projection = project::project(&ledger_rows, theme);

        Ok(SaldoReport {
            sheet: template,
            columns,
            last_row,
            summary_row,
            ledger: ledger_rows,
            projection,
            logo,
        })
    }
}

/// Oreže povinný parameter hlavičky; prázdny je okamžitá chyba.
fn required_param(value: &str, field: &'static str) -> Result<String, SaldoError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(SaldoError::BlankParameter { field })
    } else {
        Ok(trimmed.to_string())
    }
}
