//! Tabuľkový model zdrojov: bunky a hárky s určeným riadkom hlavičky.
//!
//! Engine pracuje výhradne nad týmto modelom; binárne kontajnery
//! tabuliek číta a zapisuje externý kolaborant. Jediný zabudovaný
//! vstup je textové CSV.

use crate::error::SaldoError;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::fmt;
use std::io::Read;

static EMPTY_CELL: Cell = Cell::Empty;

/// Hodnota jednej bunky tabuľkového zdroja.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Prázdna bunka.
    Empty,
    /// Textová hodnota.
    Text(String),
    /// Číselná hodnota.
    Number(Decimal),
    /// Dátumová hodnota.
    Date(NaiveDate),
    /// Vzorec tak, ako by ho používateľ napísal do bunky (vrátane `=`).
    Formula(String),
}

impl Cell {
    /// Bunka je prázdna, keď neobsahuje nič alebo prázdny text.
    /// Text z bielych znakov prázdny nie je, medzera je dáta.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Textový obsah bunky, pokiaľ je textová.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Kľúč pre vyhľadávacie tabuľky: text sa oreže (prázdny kľúč
    /// neexistuje), číselné a dátumové hodnoty sa prepíšu na text tak,
    /// ako sú. Vzorce kľúč netvoria.
    pub(crate) fn lookup_key(&self) -> Option<String> {
        match self {
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Self::Number(n) => Some(n.to_string()),
            Self::Date(d) => Some(d.to_string()),
            Self::Empty | Self::Formula(_) => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) | Self::Formula(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{d}"),
        }
    }
}

/// Usporiadaný tabuľkový zdroj s určeným 1-based riadkom hlavičky.
///
/// Riadky aj stĺpce sa adresujú 1-based ako v tabuľkovom procesore;
/// stĺpce sa však nehľadajú pozične, ale podľa textu hlavičky
/// (pozri [`crate::find_exact`] a [`crate::find_normalized`]).
#[derive(Debug, Clone)]
pub struct Sheet {
    rows: Vec<Vec<Cell>>,
    header_row: u32,
}

impl Sheet {
    /// Vytvorí prázdny hárok s hlavičkou na zadanom riadku.
    #[must_use]
    pub const fn new(header_row: u32) -> Self {
        Self {
            rows: Vec::new(),
            header_row,
        }
    }

    /// Vytvorí hárok z hotových riadkov buniek.
    #[must_use]
    pub fn from_rows(header_row: u32, rows: Vec<Vec<Cell>>) -> Self {
        Self { rows, header_row }
    }

    /// Načíta hárok z CSV. Prázdne polia sa stávajú prázdnymi bunkami,
    /// všetko ostatné zostáva textom; typovanie hodnôt rieši až engine.
    pub fn from_csv_reader<R: Read>(reader: R, header_row: u32) -> Result<Self, SaldoError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let cells = record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect();
            rows.push(cells);
        }

        Ok(Self { rows, header_row })
    }

    /// Riadok hlavičky (1-based).
    #[must_use]
    pub const fn header_row(&self) -> u32 {
        self.header_row
    }

    /// Najvyšší obsadený riadok.
    #[must_use]
    pub fn max_row(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Najvyšší obsadený stĺpec naprieč všetkými riadkami.
    #[must_use]
    pub fn max_col(&self) -> u32 {
        self.rows.iter().map(Vec::len).max().unwrap_or(0) as u32
    }

    /// Hodnota bunky; mimo obsadeného rozsahu vracia prázdnu bunku.
    #[must_use]
    pub fn cell(&self, row: u32, col: u32) -> &Cell {
        if row == 0 || col == 0 {
            return &EMPTY_CELL;
        }
        self.rows
            .get(row as usize - 1)
            .and_then(|cells| cells.get(col as usize - 1))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Zapíše hodnotu bunky, podľa potreby hárok zväčší.
    pub fn set_cell(&mut self, row: u32, col: u32, value: Cell) {
        assert!(row >= 1 && col >= 1, "cell coordinates are 1-based");
        let row = row as usize - 1;
        let col = col as usize - 1;
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, Cell::Empty);
        }
        cells[col] = value;
    }

    /// Riadok je prázdny, keď je prázdna každá jeho bunka.
    /// Neexistujúci riadok je prázdny.
    #[must_use]
    pub fn row_is_blank(&self, row: u32) -> bool {
        if row == 0 {
            return true;
        }
        self.rows
            .get(row as usize - 1)
            .is_none_or(|cells| cells.iter().all(Cell::is_blank))
    }

    /// Odstráni všetky riadky pod zadaným riadkom; počet riadkov sa
    /// skutočne zmenší, neostávajú vyprázdnené pozície.
    pub(crate) fn truncate_after(&mut self, row: u32) {
        self.rows.truncate(row as usize);
    }
}
