//! 52-card poker deck

use serde::{Deserialize, Serialize};

use super::{shuffle, ShuffleError};
use crate::models::StepRecord;
use crate::rng::BbsGenerator;

pub const SUITS: [&str; 4] = ["♠", "♥", "♦", "♣"];
pub const RANKS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

/// Shuffled deck plus the metadata front ends display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckShuffle {
    pub success: bool,
    pub shuffled_deck: Vec<String>,
    pub card_count: usize,
    pub steps: Vec<StepRecord>,
    pub message: String,
}

/// Unshuffled deck: suits outer (♠ ♥ ♦ ♣), ranks inner (A through K)
pub fn standard_deck() -> Vec<String> {
    SUITS
        .iter()
        .flat_map(|suit| RANKS.iter().map(move |rank| format!("{rank}{suit}")))
        .collect()
}

/// Shuffle a fresh standard deck
pub fn shuffle_deck(generator: &mut BbsGenerator) -> Result<DeckShuffle, ShuffleError> {
    let outcome = shuffle(generator, standard_deck())?;

    Ok(DeckShuffle {
        success: true,
        card_count: outcome.permuted.len(),
        message: format!(
            "Deck shuffled successfully with {} random swaps",
            outcome.steps.len()
        ),
        shuffled_deck: outcome.permuted,
        steps: outcome.steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_deck_layout() {
        let deck = standard_deck();

        assert_eq!(deck.len(), 52);
        assert_eq!(deck[0], "A♠");
        assert_eq!(deck[9], "10♠");
        assert_eq!(deck[12], "K♠");
        assert_eq!(deck[13], "A♥");
        assert_eq!(deck[51], "K♣");
    }

    #[test]
    fn test_deck_shuffle_output_shape() {
        let mut g = crate::BbsParams::new(10007u32, 10039u32, 12u32)
            .generator()
            .unwrap();
        let shuffled = shuffle_deck(&mut g).unwrap();

        assert!(shuffled.success);
        assert_eq!(shuffled.card_count, 52);
        assert_eq!(
            shuffled.message,
            format!(
                "Deck shuffled successfully with {} random swaps",
                shuffled.steps.len()
            )
        );

        let mut sorted = shuffled.shuffled_deck.clone();
        sorted.sort();
        let mut expected = standard_deck();
        expected.sort();
        assert_eq!(sorted, expected);

        let json = serde_json::to_value(&shuffled).unwrap();
        assert!(json.get("shuffledDeck").is_some());
        assert_eq!(json["cardCount"], 52);
    }

    #[test]
    fn test_demo_params_cycle_too_short_for_deck() {
        // 61 * 53 with seed 12 has a 12-bit period; every 4-bit window at
        // position 11 is above 11, so rejection sampling never accepts.
        let mut g = crate::BbsParams::default().generator().unwrap();
        let err = shuffle_deck(&mut g).unwrap_err();
        assert!(matches!(
            err,
            ShuffleError::DegenerateStream { position: 11, .. }
        ));
    }
}
