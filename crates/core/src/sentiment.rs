//! Sentiment breakdown for a conversation.
//!
//! `aggregate` is pure and total: it never fails on dirty labels, it folds them
//! into [`SentimentLabel::Neutral`].

use serde::{Deserialize, Serialize};

use crate::domain::message::Message;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Selection order for the overall label when counts tie.
    pub const PRIORITY: [SentimentLabel; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    /// Maps a stored label onto a category. Only the exact lowercase spellings are
    /// recognized; anything else is neutral.
    pub fn normalize(raw: &str) -> Self {
        match raw {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            _ => Self::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub total: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub overall: SentimentLabel,
    /// Bodies of negative messages, in conversation order.
    pub flagged: Vec<String>,
}

impl SentimentBreakdown {
    pub fn count(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SentimentSummary {
    NoMessages,
    Breakdown(SentimentBreakdown),
}

/// Aggregates labeled messages that are already in conversation order.
pub fn aggregate<'a, I>(messages: I) -> SentimentSummary
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut positive = 0;
    let mut neutral = 0;
    let mut negative = 0;
    let mut flagged = Vec::new();

    for message in messages {
        match SentimentLabel::normalize(&message.sentiment_label) {
            SentimentLabel::Positive => positive += 1,
            SentimentLabel::Neutral => neutral += 1,
            SentimentLabel::Negative => {
                negative += 1;
                flagged.push(message.message.clone());
            }
        }
    }

    let total = positive + neutral + negative;
    if total == 0 {
        return SentimentSummary::NoMessages;
    }

    let mut breakdown = SentimentBreakdown {
        total,
        positive,
        neutral,
        negative,
        overall: SentimentLabel::Neutral,
        flagged,
    };
    breakdown.overall = overall_label(&breakdown);
    SentimentSummary::Breakdown(breakdown)
}

fn overall_label(breakdown: &SentimentBreakdown) -> SentimentLabel {
    let mut overall = SentimentLabel::PRIORITY[0];
    for label in SentimentLabel::PRIORITY.into_iter().skip(1) {
        // strict comparison keeps the earlier label on ties
        if breakdown.count(label) > breakdown.count(overall) {
            overall = label;
        }
    }
    overall
}
