//! Pomocné funkcie: normalizácia textov hlavičiek, písmená stĺpcov,
//! dátumové seriály a rozpoznanie formátu loga.

use crate::types::ImageKind;
use chrono::{Days, NaiveDate};

/// Normalizuje text hlavičky: nezalomiteľné medzery nahradí obyčajnými,
/// zhluky bielych znakov schlopí do jednej medzery, text zmenší a odstráni
/// diakritiku. Výsledok je orezaný z oboch strán.
pub fn normalize(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut prev_space = false;
    for ch in value.chars() {
        let ch = match ch {
            '\u{a0}' | '\u{202f}' => ' ',
            other => other,
        };
        if ch.is_whitespace() {
            if !prev_space {
                output.push(' ');
            }
            prev_space = true;
        } else {
            for lower in ch.to_lowercase() {
                output.push(fold_diacritic(lower));
            }
            prev_space = false;
        }
    }
    output.trim().to_string()
}

/// Prevedie malé písmeno s diakritikou na základné písmeno.
const fn fold_diacritic(ch: char) -> char {
    match ch {
        'á' | 'ä' => 'a',
        'č' => 'c',
        'ď' => 'd',
        'é' | 'ě' => 'e',
        'í' => 'i',
        'ĺ' | 'ľ' => 'l',
        'ň' => 'n',
        'ó' | 'ô' | 'ö' => 'o',
        'ŕ' | 'ř' => 'r',
        'š' => 's',
        'ť' => 't',
        'ú' | 'ů' | 'ü' => 'u',
        'ý' => 'y',
        'ž' => 'z',
        other => other,
    }
}

/// Prevedie 1-based index stĺpca na písmenové označenie (1 → `A`, 27 → `AA`).
pub fn column_letter(column: u32) -> String {
    let mut n = column;
    let mut letters = String::new();
    while n > 0 {
        n -= 1;
        letters.insert(0, char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters
}

/// Prevedie tabuľkový dátumový seriál (počet dní od 30.12.1899) na dátum.
/// Zlomková časť (čas) sa zahadzuje už pred volaním.
pub fn date_from_serial(days: i64) -> Option<NaiveDate> {
    if days <= 0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(days as u64))
}

/// Rozpozná kontajner obrázka loga podľa magických bajtov.
pub fn sniff_image(bytes: &[u8]) -> Option<ImageKind> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some(ImageKind::Png)
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(ImageKind::Jpeg)
    } else if bytes.starts_with(b"GIF8") {
        Some(ImageKind::Gif)
    } else {
        None
    }
}
