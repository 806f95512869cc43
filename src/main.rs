//! CLI: zostaví saldo report zo štyroch CSV zdrojov a vypíše súhrn.

use clap::Parser;
use saldo_report::{
    DEFAULT_COMPANY, ISSUED_HEADER, SaldoBuilder, SaldoInputs, SaldoReport, Sheet,
    TEMPLATE_HEADER_ROW, Theme,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "saldo-report",
    version,
    about = "Generátor saldo reportu fakturačného účtu"
)]
struct Cli {
    /// Šablóna reportu (CSV)
    #[arg(long)]
    template: PathBuf,

    /// Pomôcka s prevodom označení pôvodu (CSV)
    #[arg(long)]
    helper: PathBuf,

    /// Pohyby fakturačného účtu (CSV)
    #[arg(long)]
    movements: PathBuf,

    /// Väzby s doplnkovými referenciami (CSV)
    #[arg(long)]
    references: PathBuf,

    /// Meno zákazníka
    #[arg(long)]
    meno: String,

    /// SAP ID zákazníka
    #[arg(long)]
    sap: String,

    /// Číslo zmluvného účtu
    #[arg(long)]
    ucet: String,

    /// Názov spoločnosti
    #[arg(long, default_value = DEFAULT_COMPANY)]
    spol: String,

    /// Vizuálna téma (blue, gray, warm)
    #[arg(long, default_value = "blue")]
    tema: String,

    /// Riadok hlavičky šablóny
    #[arg(long, default_value_t = TEMPLATE_HEADER_ROW)]
    header_row: u32,

    /// Kam zapísať projekciu riadkov (CSV)
    #[arg(long)]
    report_out: Option<PathBuf>,

    /// Kam zapísať prepísanú šablónu (CSV)
    #[arg(long)]
    sheet_out: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Chyba: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let inputs = SaldoInputs {
        template: Sheet::from_csv_reader(File::open(&cli.template)?, cli.header_row)?,
        helper: Sheet::from_csv_reader(File::open(&cli.helper)?, 1)?,
        movements: Sheet::from_csv_reader(File::open(&cli.movements)?, 1)?,
        references: Sheet::from_csv_reader(File::open(&cli.references)?, 1)?,
    };

    let report = SaldoBuilder::new(inputs, &cli.meno, &cli.sap, &cli.ucet)
        .company(&cli.spol)
        .theme(Theme::from_name(&cli.tema))
        .generate()?;

    println!(
        "Saldokonto: {} riadkov, celkový zostatok {}",
        report.projection.rows.len(),
        report.projection.total
    );
    println!("Téma: {}", report.projection.theme.name());

    if let Some(path) = &cli.report_out {
        write_projection(path, &report)?;
        println!("Projekcia zapísaná do {}", path.display());
    }
    if let Some(path) = &cli.sheet_out {
        write_sheet(path, &report.sheet)?;
        println!("Šablóna zapísaná do {}", path.display());
    }

    Ok(())
}

/// Zapíše projekciu reportu ako CSV s kanonickou hlavičkou.
fn write_projection(path: &Path, report: &SaldoReport) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "Číslo dokladu",
        "Číslo Faktúry",
        ISSUED_HEADER,
        "Dátum účtovania",
        "Splatnosť netto",
        "Typ dokladu",
        "Čiastka",
        "Zostatok",
    ])?;
    for row in &report.projection.rows {
        writer.write_record([
            &row.document,
            &row.invoice,
            &row.issued,
            &row.posted,
            &row.due,
            &row.doc_type,
            &row.amount,
            &row.balance,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Zapíše celý hárok ako CSV; vzorce zostávajú v textovej podobe.
fn write_sheet(path: &Path, sheet: &Sheet) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in 1..=sheet.max_row() {
        let record: Vec<String> = (1..=sheet.max_col())
            .map(|col| sheet.cell(row, col).to_string())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
