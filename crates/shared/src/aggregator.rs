use std::collections::HashMap;

use crate::sources::Headline;

pub const SYSTEM_INSTRUCTION: &str = "You are a news aggregator bot. Given a list of sources, and a list of posts from each source, provide a nuanced summary of what's being posted. Be thorough, but be careful! The messages can't be too long (2000 character limit!). Details matter, no matter how noisy/inappropriate (don't forget 4chan!). Be specific! Focus on _all_ the topics being talked about, not the fact that the chatter exists. The user already knows what you're being given--there's no need to restate or provide context. Do not segregate, do not organize. Write as if you are speaking with a friend on what you've seen.";

/// Everything the summarizer is asked: the fixed instruction plus the rendered headlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayload {
    pub system: String,
    pub user: String,
}

/// Headlines grouped by origin, in the order each origin was first seen.
#[derive(Debug, Default)]
pub struct HeadlineGroups<'a> {
    groups: Vec<(&'a str, Vec<&'a str>)>,
    index: HashMap<&'a str, usize>,
}

impl<'a> HeadlineGroups<'a> {
    pub fn from_headlines(headlines: &'a [Headline]) -> Self {
        let mut grouped = Self::default();
        for headline in headlines {
            grouped.push(&headline.origin, &headline.title);
        }
        grouped
    }

    fn push(&mut self, origin: &'a str, title: &'a str) {
        match self.index.get(origin) {
            Some(&slot) => self.groups[slot].1.push(title),
            None => {
                self.index.insert(origin, self.groups.len());
                self.groups.push((origin, vec![title]));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a str])> + '_ {
        self.groups.iter().map(|(origin, titles)| (*origin, titles.as_slice()))
    }

    pub fn render(&self) -> String {
        let mut prompt = String::new();
        for (origin, titles) in self.iter() {
            prompt.push_str("- ");
            prompt.push_str(origin);
            prompt.push('\n');
            for title in titles {
                prompt.push_str("  - ");
                prompt.push_str(title);
                prompt.push('\n');
            }
        }
        prompt.push_str("\n\n");
        prompt
    }
}

/// Groups `headlines` by origin and pairs the rendered block with the system instruction.
/// Duplicate titles are kept as they are.
pub fn build_prompt(headlines: &[Headline]) -> PromptPayload {
    PromptPayload {
        system: SYSTEM_INSTRUCTION.to_string(),
        user: HeadlineGroups::from_headlines(headlines).render(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headline(origin: &str, title: &str) -> Headline {
        Headline::new(title, origin).unwrap()
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let items = vec![headline("B", "x"), headline("A", "y"), headline("B", "z")];
        let prompt = build_prompt(&items);
        assert_eq!(prompt.user, "- B\n  - x\n  - z\n- A\n  - y\n\n\n");
    }

    #[test]
    fn test_interleaved_origins_are_merged() {
        let items = vec![headline("A", "x"), headline("B", "y"), headline("A", "z")];
        let grouped = HeadlineGroups::from_headlines(&items);
        let groups: Vec<_> = grouped.iter().map(|(o, t)| (o, t.to_vec())).collect();
        assert_eq!(groups, vec![("A", vec!["x", "z"]), ("B", vec!["y"])]);
    }

    #[test]
    fn test_duplicate_titles_are_preserved() {
        let items = vec![
            headline("news.ycombinator.com", "Same"),
            headline("www.reddit.com/r/stocks", "Same"),
            headline("news.ycombinator.com", "Same"),
        ];
        let prompt = build_prompt(&items);
        assert_eq!(prompt.user.matches("  - Same\n").count(), 3);
    }

    #[test]
    fn test_empty_input_renders_terminator_only() {
        let prompt = build_prompt(&[]);
        assert_eq!(prompt.user, "\n\n");
        assert_eq!(prompt.system, SYSTEM_INSTRUCTION);
    }
}
