//! # Site Content
//!
//! Event details the invitation pages render: the couple, ceremony and
//! reception, dress code, gift note and the FAQ. Defaults describe the
//! current wedding; a JSON file with the same camelCase keys replaces them.
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static RSVP_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[RSVP_LINK\](.*?)\[/RSVP_LINK\]").expect("valid rsvp link pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Couple {
    pub bride: String,
    pub bride_nickname: String,
    pub groom: String,
    pub groom_nickname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub venue: String,
    pub location: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attire {
    pub ladies: String,
    pub gentlemen: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DressCode {
    pub theme: String,
    pub colors: Vec<String>,
    pub sponsors: Attire,
    pub guests: Attire,
    pub note: String,
}

/// One FAQ entry. An answer may carry a `[RSVP_LINK]label[/RSVP_LINK]`
/// marker, split out so pages can render the label as a link to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqItem {
    pub question: String,
    pub answer: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsvp_link: Option<String>,
}

impl FaqItem {
    pub fn new(question: &str, answer: &str) -> Self {
        let rsvp_link = RSVP_LINK
            .captures(answer)
            .and_then(|captures| captures.get(1))
            .map(|label| label.as_str().to_string());

        Self {
            question: question.to_string(),
            answer: RSVP_LINK.replace(answer, "$1").trim().to_string(),
            rsvp_link,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub couple: Couple,
    pub ceremony: Venue,
    pub reception: Venue,
    pub dress_code: DressCode,
    pub gift_note: String,
    pub faq: Vec<FaqItem>,
}

impl Default for SiteContent {
    fn default() -> Self {
        let ceremony = Venue {
            venue: "San Jose the Husband of Mary Parish".to_string(),
            location: "San Jose the Husband of Mary Parish, Buyagan, La Trinidad, Benguet"
                .to_string(),
            date: "January 10, 2026".to_string(),
            time: "2:00 PM".to_string(),
        };
        let reception = Venue {
            venue: "D & L Garden Pavilion".to_string(),
            location: "D & L Garden Pavilion, Halsema Highway, La Trinidad, Benguet".to_string(),
            date: "January 10, 2026".to_string(),
            time: "Following the ceremony".to_string(),
        };
        let gift_note = "With all that we have, we are truly blessed. Your presence and prayer \
            are all that we request. But if you desire to give nonetheless, a monetary gift is \
            the one we suggest.";

        let faq = vec![
            FaqItem::new(
                "What is the dress code?",
                "Semi-Formal attire is requested. Principal sponsors: blue gown or long \
                 dress for ladies, black suit and tie for gentlemen. Please avoid jeans and \
                 casual attire.",
            ),
            FaqItem::new(
                "When and where is the ceremony?",
                &format!(
                    "The ceremony will be held on {} at {} at {}.",
                    ceremony.date, ceremony.time, ceremony.location
                ),
            ),
            FaqItem::new(
                "Where is the reception?",
                &format!(
                    "The reception will be held at {}, {}.",
                    reception.location,
                    reception.time.to_lowercase()
                ),
            ),
            FaqItem::new(
                "When is the RSVP deadline?",
                "Please RSVP by January 8, 2026 to help us finalize our guest list. \
                 [RSVP_LINK]Click here to RSVP[/RSVP_LINK]",
            ),
            FaqItem::new(
                "Can I bring additional guests?",
                "Due to space and seating limitations, we kindly ask that only the guests \
                 listed on the invitation attend.",
            ),
            FaqItem::new("Do you have a gift registry?", gift_note),
            FaqItem::new(
                "What if I have dietary restrictions or allergies?",
                "Please mention them in the message field when you submit your RSVP.",
            ),
            FaqItem::new(
                "What should I do if I need to change my RSVP?",
                "Please contact us as soon as possible if your plans change.",
            ),
        ];

        Self {
            couple: Couple {
                bride: "Erda Precious Ricohermoso".to_string(),
                bride_nickname: "Erda".to_string(),
                groom: "Russell Ticbaen".to_string(),
                groom_nickname: "Russell".to_string(),
            },
            ceremony,
            reception,
            dress_code: DressCode {
                theme: "Semi-Formal Attire".to_string(),
                colors: ["#402921", "#BB8A3D", "#CDAC77", "#FFF6E7"]
                    .map(String::from)
                    .to_vec(),
                sponsors: Attire {
                    ladies: "Blue gown / long dress".to_string(),
                    gentlemen: "Black suit and tie".to_string(),
                },
                guests: Attire {
                    ladies: "Long or cocktail dress".to_string(),
                    gentlemen: "Long sleeve, polo, pants or suit".to_string(),
                },
                note: "Please avoid jeans and casual attire.".to_string(),
            },
            gift_note: gift_note.to_string(),
            faq,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_rsvp_link_split_out() {
        let item = FaqItem::new("Deadline?", "RSVP soon. [RSVP_LINK]Click here[/RSVP_LINK]");

        assert_eq!(item.answer, "RSVP soon. Click here");
        assert_eq!(item.rsvp_link.as_deref(), Some("Click here"));
        assert_eq!(FaqItem::new("Parking?", "Yes.").rsvp_link, None);
    }

    #[test]
    fn test_default_faq_follows_details() {
        let site = SiteContent::default();

        let ceremony = &site.faq[1];
        assert!(ceremony.answer.contains(&site.ceremony.location));
        assert!(site.faq.iter().any(|item| item.answer == site.gift_note));
    }

    #[test]
    fn test_camel_case_keys() {
        let value = serde_json::to_value(SiteContent::default()).unwrap();

        assert_eq!(value["couple"]["brideNickname"], "Erda");
        assert_eq!(value["dressCode"]["guests"]["gentlemen"], "Long sleeve, polo, pants or suit");
        assert!(value["giftNote"].is_string());

        let parsed: SiteContent = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, SiteContent::default());
        assert!(serde_json::from_value::<SiteContent>(json!({ "couple": {} })).is_err());
    }
}
