//! Doménové typy saldo reportu.

use crate::table::Cell;
use rust_decimal::Decimal;

/// Peňažná hodnota, používame `Decimal` kvôli presným súčtom.
pub type Money = Decimal;

/// Farebná paleta témy: výplň hlavičky, striedavých riadkov a mriežky.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Výplň riadku hlavičky.
    pub header: &'static str,
    /// Výplň striedavých dátových riadkov.
    pub alt: &'static str,
    /// Farba mriežky tabuľky.
    pub grid: &'static str,
}

/// Pomenovaná vizuálna téma reportu. Engine tému iba vyberá a odovzdáva
/// vykresľovaciemu kolaborantovi, farby sám nijako neinterpretuje.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Predvolená modrá téma.
    #[default]
    Blue,
    /// Sivá téma.
    Gray,
    /// Teplá téma.
    Warm,
}

impl Theme {
    /// Vyberie tému podľa názvu; neznámy názov padá na predvolenú modrú.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "gray" => Self::Gray,
            "warm" => Self::Warm,
            _ => Self::Blue,
        }
    }

    /// Názov témy, pod ktorým sa vyberá.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Gray => "gray",
            Self::Warm => "warm",
        }
    }

    /// Farebná paleta témy.
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Blue => Palette {
                header: "#25B3AD",
                alt: "#F9FEFD",
                grid: "#E2E8F0",
            },
            Self::Gray => Palette {
                header: "#4A5568",
                alt: "#F7F7F7",
                grid: "#D9D9D9",
            },
            Self::Warm => Palette {
                header: "#C6A875",
                alt: "#FFF9F2",
                grid: "#EADDC8",
            },
        }
    }
}

/// Kontajner obrázka loga rozpoznaný podľa magických bajtov.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// PNG obrázok.
    Png,
    /// JPEG obrázok.
    Jpeg,
    /// GIF obrázok.
    Gif,
}

impl ImageKind {
    /// Prípona súboru zodpovedajúca kontajneru.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
        }
    }
}

/// Jeden zrekonciliovaný riadok salda načítaný späť zo šablóny.
/// Identitou riadku je jeho pozícia, duplicitné čísla dokladov sa pripúšťajú.
#[derive(Debug, Clone)]
pub struct LedgerRow {
    /// Číslo dokladu.
    pub document: Cell,
    /// Číslo faktúry (prázdne mimo faktúr).
    pub invoice: Cell,
    /// Dátum vystavenia / pripísania platby.
    pub issued: Cell,
    /// Dátum účtovania.
    pub posted: Cell,
    /// Splatnosť netto (prázdna mimo faktúr).
    pub due: Cell,
    /// Typ dokladu doplnený z pomôcky.
    pub doc_type: Cell,
    /// Čiastka, pokiaľ sa dala číselne prečítať.
    pub amount: Option<Money>,
    /// Priebežný zostatok vrátane tohto riadku.
    pub balance: Money,
}

/// Riadok pripravený na vykreslenie: všetky polia už sformátované.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Číslo dokladu.
    pub document: String,
    /// Číslo faktúry (prázdne mimo faktúr).
    pub invoice: String,
    /// Dátum vystavenia / pripísania platby v tvare `d.m.Y`.
    pub issued: String,
    /// Dátum účtovania v tvare `d.m.Y`.
    pub posted: String,
    /// Splatnosť netto v tvare `d.m.Y` (prázdna mimo faktúr).
    pub due: String,
    /// Typ dokladu.
    pub doc_type: String,
    /// Čiastka v tvare `1 234,56 €`.
    pub amount: String,
    /// Priebežný zostatok v tvare `1 234,56 €`.
    pub balance: String,
}

/// Plochá projekcia saldo reportu pre vykresľovacieho kolaboranta.
#[derive(Debug, Clone)]
pub struct ProjectedReport {
    /// Dátové riadky v poradí saldokonta.
    pub rows: Vec<ReportRow>,
    /// Celkový zostatok = priebežný zostatok posledného riadku.
    pub total: String,
    /// Zvolená vizuálna téma.
    pub theme: Theme,
}
