//! # Entourage Layout
//!
//! Groups the wedding party by role category and lays each group out the way
//! the invitation prints it: some categories face each other across two
//! columns, small ones are centered, the rest split down the middle.
//!
//! A facing pair is printed as soon as either side has members, so a lone
//! maid of honor still gets the "Best Man" section with an empty left column.
//! Categories outside [`ROLE_CATEGORY_ORDER`] come last and are centered only
//! when they have two members or fewer.
use serde::Serialize;

use crate::records::{EntourageMember, PrincipalSponsorPair};

pub const OTHER_CATEGORY: &str = "Other";

pub const ROLE_CATEGORY_ORDER: [&str; 12] = [
    "The Couple",
    "Parents of the Groom",
    "Parents of the Bride",
    "Best Man",
    "Maid/Matron of Honor",
    "Candle Sponsors",
    "Veil Sponsors",
    "Cord Sponsors",
    "Groomsmen",
    "Bridesmaids",
    "Flower Girls",
    "Ring/Coin Bearers",
];

/// Categories rendered side by side, left then right.
const FACING_CATEGORIES: [(&str, &str); 4] = [
    ("Parents of the Groom", "Parents of the Bride"),
    ("Best Man", "Maid/Matron of Honor"),
    ("Candle Sponsors", "Veil Sponsors"),
    ("Groomsmen", "Bridesmaids"),
];

/// Always centered when they appear in the display order.
const SINGLE_COLUMN_CATEGORIES: [&str; 6] = [
    "Best Man",
    "Maid/Matron of Honor",
    "Ring Bearer",
    "Coin Bearer",
    "Bible Bearer",
    "Presider",
];

const COUPLE: &str = "The Couple";
const CORD_SPONSORS: &str = "Cord Sponsors";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row<T> {
    pub left: Option<T>,
    pub right: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "members", rename_all = "snake_case")]
pub enum Layout {
    Centered(Vec<EntourageMember>),
    Columns(Vec<Row<EntourageMember>>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_title: Option<String>,

    pub layout: Layout,
}

/// Categories in first-seen order, members in input order.
pub fn group_by_category(members: &[EntourageMember]) -> Vec<(String, Vec<EntourageMember>)> {
    let mut groups: Vec<(String, Vec<EntourageMember>)> = Vec::new();

    for member in members {
        let category = if member.role_category.is_empty() {
            OTHER_CATEGORY
        } else {
            member.role_category.as_str()
        };

        match groups.iter_mut().find(|(name, _)| name == category) {
            Some((_, group)) => group.push(member.clone()),
            None => groups.push((category.to_string(), vec![member.clone()])),
        }
    }

    groups
}

pub fn layout_sections(members: &[EntourageMember]) -> Vec<Section> {
    let groups = group_by_category(members);
    let group = |category: &str| find_group(&groups, category);

    let mut sections = Vec::new();

    for category in ROLE_CATEGORY_ORDER {
        if category == COUPLE {
            let couple = group(COUPLE);
            if !couple.is_empty() {
                sections.push(couple_section(couple));
            }
            continue;
        }

        if FACING_CATEGORIES.iter().any(|(_, right)| *right == category) {
            continue;
        }

        if let Some((left, right)) = FACING_CATEGORIES.iter().find(|(left, _)| *left == category) {
            let mut left_members = group(*left).to_vec();
            let mut right_members = group(*right).to_vec();
            if left_members.is_empty() && right_members.is_empty() {
                continue;
            }

            if left.starts_with("Parents") {
                sort_parents(&mut left_members);
                sort_parents(&mut right_members);
            }

            sections.push(Section {
                title: left.to_string(),
                right_title: Some(right.to_string()),
                layout: Layout::Columns(facing_rows(left_members, right_members)),
            });
            continue;
        }

        let members = group(category);
        if !members.is_empty() {
            let single_column = SINGLE_COLUMN_CATEGORIES.contains(&category);
            sections.push(default_section(category, members, single_column));
        }
    }

    sections.extend(
        groups
            .iter()
            .filter(|(name, _)| !ROLE_CATEGORY_ORDER.contains(&name.as_str()))
            .map(|(name, members)| default_section(name, members, false)),
    );

    sections
}

fn find_group<'a>(
    groups: &'a [(String, Vec<EntourageMember>)],
    category: &str,
) -> &'a [EntourageMember] {
    groups
        .iter()
        .find(|(name, _)| name == category)
        .map(|(_, group)| group.as_slice())
        .unwrap_or_default()
}

fn couple_section(members: &[EntourageMember]) -> Section {
    let titled = |needle: &str| {
        members
            .iter()
            .find(|member| member.role_title.to_lowercase().contains(needle))
            .cloned()
    };

    Section {
        title: COUPLE.to_string(),
        right_title: None,
        layout: Layout::Columns(vec![Row {
            left: titled("groom"),
            right: titled("bride"),
        }]),
    }
}

/// Fathers first, otherwise stable.
fn sort_parents(parents: &mut [EntourageMember]) {
    parents.sort_by_key(|parent| !parent.role_title.to_lowercase().contains("father"));
}

fn default_section(category: &str, members: &[EntourageMember], single_column: bool) -> Section {
    let layout = if category == CORD_SPONSORS && members.len() == 2 {
        Layout::Columns(vec![Row {
            left: Some(members[0].clone()),
            right: Some(members[1].clone()),
        }])
    } else if single_column || members.len() <= 2 {
        Layout::Centered(members.to_vec())
    } else {
        let half = members.len().div_ceil(2);
        Layout::Columns(facing_rows(
            members[..half].to_vec(),
            members[half..].to_vec(),
        ))
    };

    Section {
        title: category.to_string(),
        right_title: None,
        layout,
    }
}

/// Zips two columns, padding the shorter one with blanks.
pub fn facing_rows<T>(left: Vec<T>, right: Vec<T>) -> Vec<Row<T>> {
    let rows = left.len().max(right.len());
    let mut left = left.into_iter();
    let mut right = right.into_iter();

    (0..rows)
        .map(|_| Row {
            left: left.next(),
            right: right.next(),
        })
        .collect()
}

pub fn sponsor_rows(pairs: &[PrincipalSponsorPair]) -> Vec<Row<String>> {
    pairs
        .iter()
        .map(|pair| Row {
            left: (!pair.male.is_empty()).then(|| pair.male.clone()),
            right: (!pair.female.is_empty()).then(|| pair.female.clone()),
        })
        .collect()
}
