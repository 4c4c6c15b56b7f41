//! Resolves a user's selection reference against the open option list.
//!
//! A reference is either a structured payload (zero-based index, usually
//! from a button) or free text containing an ordinal word or a number.
//! Structured payloads take precedence. Resolution never mutates anything;
//! the caller applies the result.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::options::{ListedOption, OptionList};
use super::trip::Leg;

/// Selection failures. State is left unchanged on every one of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("There are no options waiting for a choice right now.")]
    NoOpenList,

    #[error("I couldn't tell which option you meant. Reply with first, second or third, or a number.")]
    Unparseable,

    #[error("Please choose an option between 1 and {len}.")]
    OutOfRange { position: u64, len: usize },

    #[error("That choice was for the {found}, but I'm waiting for your {expected}. Please choose again from the latest list.")]
    WrongLeg { expected: Leg, found: Leg },

    #[error("Those options are out of date. Please choose again from the latest list.")]
    StaleList { expected: u32, found: u32 },

    #[error("Option {position} can't be booked. Please choose another one.")]
    Unavailable { position: u64 },
}

/// Structured selection payload, as carried by option buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectPayload {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg: Option<Leg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<u32>,
}

/// What the user pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionReference {
    Structured(SelectPayload),
    FreeText(String),
}

impl SelectionReference {
    /// Builds a reference from a turn; a payload wins over text.
    pub fn from_turn(payload: Option<SelectPayload>, text: &str) -> Self {
        match payload {
            Some(p) => Self::Structured(p),
            None => Self::FreeText(text.to_string()),
        }
    }
}

static ORDINALS: Lazy<HashMap<&'static str, u64>> = Lazy::new(|| {
    HashMap::from([
        ("first", 1),
        ("1st", 1),
        ("one", 1),
        ("second", 2),
        ("2nd", 2),
        ("two", 2),
        ("third", 3),
        ("3rd", 3),
        ("three", 3),
        ("fourth", 4),
        ("4th", 4),
        ("four", 4),
        ("fifth", 5),
        ("5th", 5),
        ("five", 5),
        ("last", u64::MAX),
    ])
});

/// Finds the first ordinal word or number in `text`, one-based.
///
/// `last` maps to `u64::MAX` and is resolved against the list length.
/// Dates and clock times such as `2030-05-01` or `10:30` are not positions.
pub fn parse_position(text: &str) -> Option<u64> {
    text.split_whitespace()
        .filter(|word| !is_date_or_time(word))
        .flat_map(|word| word.split(|c: char| !c.is_ascii_alphanumeric()))
        .filter(|t| !t.is_empty())
        .find_map(|token| {
            let token = token.to_ascii_lowercase();
            if let Some(pos) = ORDINALS.get(token.as_str()) {
                return Some(*pos);
            }
            if token.chars().all(|c| c.is_ascii_digit()) {
                return Some(token.parse().unwrap_or(u64::MAX - 1));
            }
            None
        })
}

const DATE_SEPARATORS: [char; 4] = ['-', '/', '.', ':'];

/// Digit groups joined by date or time separators.
fn is_date_or_time(word: &str) -> bool {
    let word = word.trim_matches(|c: char| !c.is_ascii_alphanumeric());
    word.contains(DATE_SEPARATORS)
        && word
            .split(DATE_SEPARATORS)
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}

/// Resolves `reference` against `list`, which must be the open list.
pub fn resolve_selection<'a, T>(
    reference: &SelectionReference,
    list: &'a OptionList<T>,
) -> Result<&'a T, SelectionError> {
    let position = match reference {
        SelectionReference::Structured(payload) => {
            if let Some(leg) = payload.leg {
                if leg != list.leg() {
                    return Err(SelectionError::WrongLeg {
                        expected: list.leg(),
                        found: leg,
                    });
                }
            }
            if let Some(id) = payload.list_id {
                if id != list.list_id() {
                    return Err(SelectionError::StaleList {
                        expected: list.list_id(),
                        found: id,
                    });
                }
            }
            (payload.index as u64).saturating_add(1)
        }
        SelectionReference::FreeText(text) => {
            match parse_position(text).ok_or(SelectionError::Unparseable)? {
                u64::MAX => list.len() as u64,
                p => p,
            }
        }
    };

    if position == 0 || position > list.len() as u64 {
        return Err(SelectionError::OutOfRange {
            position,
            len: list.len(),
        });
    }

    match list.get((position - 1) as usize) {
        Some(ListedOption::Available { option }) => Ok(option),
        _ => Err(SelectionError::Unavailable { position }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::options::fixtures::flight;
    use crate::domain::booking::options::FlightOption;
    use proptest::prelude::*;

    fn list(len: usize) -> OptionList<FlightOption> {
        OptionList::new(
            Leg::Outbound,
            4,
            (0..len)
                .map(|i| ListedOption::available(flight(450 + i as i64 * 70, "MYR")))
                .collect(),
        )
    }

    fn text(s: &str) -> SelectionReference {
        SelectionReference::FreeText(s.to_string())
    }

    mod free_text {
        use super::*;

        #[test]
        fn ordinal_words_select_by_position() {
            let l = list(3);
            assert_eq!(resolve_selection(&text("the first one"), &l).unwrap().price.amount_minor(), 45_000);
            assert_eq!(resolve_selection(&text("Second please"), &l).unwrap().price.amount_minor(), 52_000);
            assert_eq!(resolve_selection(&text("third"), &l).unwrap().price.amount_minor(), 59_000);
        }

        #[test]
        fn digits_are_one_based() {
            let l = list(3);
            assert_eq!(resolve_selection(&text("select flight 1"), &l).unwrap().price.amount_minor(), 45_000);
            assert_eq!(resolve_selection(&text("2"), &l).unwrap().price.amount_minor(), 52_000);
        }

        #[test]
        fn last_picks_final_entry() {
            let l = list(2);
            assert_eq!(resolve_selection(&text("the last one"), &l).unwrap().price.amount_minor(), 52_000);
        }

        #[test]
        fn four_against_three_is_out_of_range() {
            assert_eq!(
                resolve_selection(&text("4"), &list(3)),
                Err(SelectionError::OutOfRange { position: 4, len: 3 })
            );
            assert!(matches!(
                resolve_selection(&text("fourth"), &list(3)),
                Err(SelectionError::OutOfRange { .. })
            ));
        }

        #[test]
        fn zero_is_out_of_range() {
            assert!(matches!(
                resolve_selection(&text("0"), &list(3)),
                Err(SelectionError::OutOfRange { position: 0, .. })
            ));
        }

        #[test]
        fn text_without_reference_is_unparseable() {
            assert_eq!(
                resolve_selection(&text("the cheap one"), &list(3)),
                Err(SelectionError::Unparseable)
            );
        }

        #[test]
        fn dates_and_times_are_not_positions() {
            assert_eq!(parse_position("2030-05-01"), None);
            assert_eq!(parse_position("leaving 01/05 at 10:30."), None);
            assert_eq!(
                resolve_selection(&text("2030-05-01"), &list(3)),
                Err(SelectionError::Unparseable)
            );
        }

        #[test]
        fn number_beside_a_date_still_selects() {
            assert_eq!(parse_position("option 2 on 2030-05-01"), Some(2));
            assert_eq!(parse_position("1."), Some(1));
            assert_eq!(parse_position("flight-3"), Some(3));
        }

        #[test]
        fn huge_numbers_do_not_overflow() {
            assert!(matches!(
                resolve_selection(&text("99999999999999999999999"), &list(3)),
                Err(SelectionError::OutOfRange { .. })
            ));
        }
    }

    mod structured {
        use super::*;

        fn payload(index: usize, leg: Option<Leg>, list_id: Option<u32>) -> SelectionReference {
            SelectionReference::Structured(SelectPayload { index, leg, list_id })
        }

        #[test]
        fn index_is_zero_based() {
            let l = list(3);
            assert_eq!(
                resolve_selection(&payload(1, None, None), &l).unwrap().price.amount_minor(),
                52_000
            );
        }

        #[test]
        fn payload_wins_over_text() {
            let reference = SelectionReference::from_turn(
                Some(SelectPayload { index: 2, leg: None, list_id: None }),
                "first",
            );
            assert_eq!(
                resolve_selection(&reference, &list(3)).unwrap().price.amount_minor(),
                59_000
            );
        }

        #[test]
        fn out_of_range_index_rejected() {
            assert_eq!(
                resolve_selection(&payload(3, None, None), &list(3)),
                Err(SelectionError::OutOfRange { position: 4, len: 3 })
            );
        }

        #[test]
        fn wrong_leg_rejected() {
            assert_eq!(
                resolve_selection(&payload(0, Some(Leg::Return), None), &list(3)),
                Err(SelectionError::WrongLeg {
                    expected: Leg::Outbound,
                    found: Leg::Return
                })
            );
        }

        #[test]
        fn stale_list_id_rejected() {
            assert_eq!(
                resolve_selection(&payload(0, Some(Leg::Outbound), Some(3)), &list(3)),
                Err(SelectionError::StaleList { expected: 4, found: 3 })
            );
        }
    }

    #[test]
    fn placeholder_entry_is_unavailable() {
        let l: OptionList<FlightOption> = OptionList::new(
            Leg::Outbound,
            1,
            vec![
                ListedOption::Unformattable { reason: "bad".into() },
                ListedOption::available(flight(450, "MYR")),
            ],
        );
        assert_eq!(
            resolve_selection(&text("first"), &l),
            Err(SelectionError::Unavailable { position: 1 })
        );
        assert!(resolve_selection(&text("second"), &l).is_ok());
    }

    proptest! {
        #[test]
        fn numeric_reference_succeeds_iff_in_range(len in 1usize..=3, n in 0u64..10) {
            let l = list(len);
            let result = resolve_selection(&text(&n.to_string()), &l);
            prop_assert_eq!(result.is_ok(), n >= 1 && n <= len as u64);
        }

        #[test]
        fn structured_index_matches_position(len in 1usize..=3, index in 0usize..5) {
            let l = list(len);
            let reference = SelectionReference::Structured(SelectPayload { index, leg: None, list_id: None });
            match resolve_selection(&reference, &l) {
                Ok(option) => prop_assert_eq!(option, l.get(index).unwrap().as_option().unwrap()),
                Err(err) => {
                    prop_assert!(index >= len);
                    prop_assert!(matches!(err, SelectionError::OutOfRange { .. }), "unexpected error");
                }
            }
        }
    }
}
