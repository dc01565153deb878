//! Pluggable title collation.
//!
//! # Responsibility
//! - Define the comparator contract used for default note ordering.
//! - Register the comparator on SQLite connections as `LOCALIZED`.
//!
//! # Invariants
//! - Every collator is a total order: equal folded keys fall back to the raw
//!   string, so two distinct titles never compare `Equal`.

use rusqlite::Connection;
use std::cmp::Ordering;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// SQL collation name used by every title ordering clause.
pub const COLLATION_NAME: &str = "LOCALIZED";

/// String comparator used to order note titles.
pub trait Collator: Send + Sync {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

impl<F> Collator for F
where
    F: Fn(&str, &str) -> Ordering + Send + Sync,
{
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self(a, b)
    }
}

/// Case- and accent-insensitive collation for Latin scripts.
///
/// Lowercases each character and folds common diacritics (`é` -> `e`,
/// `ß` -> `ss`, ...) before comparing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldingCollator;

impl Collator for FoldingCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        fold_key(a).cmp(&fold_key(b)).then_with(|| a.cmp(b))
    }
}

/// ASCII-only case-insensitive collation with deterministic results.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiCollator;

impl Collator for AsciiCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let folded = a
            .bytes()
            .map(|byte| byte.to_ascii_lowercase())
            .cmp(b.bytes().map(|byte| byte.to_ascii_lowercase()));
        folded.then_with(|| a.cmp(b))
    }
}

/// Registers `collator` on `conn` under [`COLLATION_NAME`].
pub fn register_collation(
    conn: &Connection,
    collator: &Arc<dyn Collator>,
) -> rusqlite::Result<()> {
    // rusqlite requires an unwind-safe callback.
    let collator = AssertUnwindSafe(Arc::clone(collator));
    conn.create_collation(COLLATION_NAME, move |a: &str, b: &str| {
        collator.compare(a, b)
    })
}

fn fold_key(value: &str) -> String {
    let mut key = String::with_capacity(value.len());
    for lowered in value.chars().flat_map(char::to_lowercase) {
        match fold_char(lowered) {
            Some(folded) => key.push_str(folded),
            None => key.push(lowered),
        }
    }
    key
}

fn fold_char(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ł' | 'ľ' | 'ĺ' | 'ļ' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'ŕ' | 'ř' | 'ŗ' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ţ' | 'ť' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        _ => return None,
    };
    Some(folded)
}
