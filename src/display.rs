use std::fmt::Write;

use crate::{
    client::BookCardDetail,
    config::Config,
    traits::DisplayTerminal,
    types::{
        author::AuthorDetail,
        book::{Availability, Book, SearchResponse},
        cover::{cover_url, known_cover_id, CoverSize},
        edition::Edition,
        inside::{InsideResults, SearchMatch},
        lookup::{BookData, ReadingLog, SubjectBooks},
        work::WorkDetail,
    },
};

impl DisplayTerminal for Book {
    fn fmt_to_string(&self, config: &Config) -> String {
        let mut s = config
            .output_title
            .format_str(self.title.as_deref().unwrap_or("Untitled"));
        if let Some(authors) = &self.author_name {
            write!(s, " {}", config.output_author.format_vec(authors)).ok();
        }
        if let Some(year) = self.first_publish_year {
            write!(s, " {}", config.output_year.format_str(year)).ok();
        }
        if let Some(availability) = &self.availability {
            write!(s, " {}", availability.fmt_to_string(config)).ok();
        }
        write!(s, " {}", config.output_key.format_str(&self.key)).ok();
        s
    }
}

impl DisplayTerminal for Availability {
    fn fmt_to_string(&self, config: &Config) -> String {
        let mut flags = vec![self.status.as_str()];
        if self.available_to_borrow {
            flags.push("borrow");
        }
        if self.available_to_waitlist {
            flags.push("waitlist");
        }
        config.output_availability.format_vec(&flags)
    }
}

impl DisplayTerminal for SearchResponse {
    fn fmt_to_string(&self, config: &Config) -> String {
        let mut s = format!("{} found, showing {}\n", self.num_found, self.docs.len());
        for book in &self.docs {
            writeln!(s, "{}", book.fmt_to_string(config)).ok();
        }
        s
    }
}

impl DisplayTerminal for WorkDetail {
    fn fmt_to_string(&self, config: &Config) -> String {
        let mut s = config
            .output_title
            .format_str(self.title.as_deref().unwrap_or("Untitled"));
        write!(s, " {}", config.output_key.format_str(&self.key)).ok();
        if let Some(subjects) = &self.subjects {
            write!(s, "\n{}", config.output_subject.format_vec(subjects)).ok();
        }
        let description = self
            .description
            .as_ref()
            .map(|x| x.text())
            .unwrap_or("No description available.");
        write!(s, "\n\n{}", config.output_description.format_str(description)).ok();
        for (i, excerpt) in self.excerpts.iter().flatten().enumerate() {
            let heading = excerpt
                .comment
                .clone()
                .unwrap_or_else(|| format!("Excerpt {}", i + 1));
            write!(s, "\n\n{heading}").ok();
            if let Some(text) = &excerpt.text {
                write!(s, "\n{}", config.output_excerpt.format_str(text)).ok();
            }
        }
        if let Some(availability) = &self.availability {
            write!(s, "\n{}", availability.fmt_to_string(config)).ok();
        }
        if let Some(item) = self.ia.as_ref().and_then(|ia| ia.first()) {
            write!(s, "\nScanned item: {item}").ok();
        }
        if !self.editions.is_empty() {
            write!(s, "\n\n{} editions", self.editions.len()).ok();
            for edition in &self.editions {
                write!(s, "\n  {}", edition.fmt_to_string(config)).ok();
            }
        }
        s
    }
}

impl DisplayTerminal for Edition {
    fn fmt_to_string(&self, config: &Config) -> String {
        let mut s = config
            .output_edition
            .format_str(self.title.as_deref().unwrap_or("Untitled edition"));
        if let Some(publishers) = &self.publishers {
            write!(s, " {}", config.output_publisher.format_vec(publishers)).ok();
        }
        if let Some(date) = &self.publish_date {
            write!(s, " {}", config.output_year.format_str(date)).ok();
        }
        if let Some(pages) = self.number_of_pages {
            write!(s, " {}", config.output_page_count.format_str(pages)).ok();
        }
        if let Some(languages) = &self.languages {
            let codes = languages
                .iter()
                .map(|x| x.key.trim_start_matches("/languages/"))
                .collect::<Vec<&str>>();
            write!(s, " {}", config.output_language.format_vec(&codes)).ok();
        }
        s
    }
}

impl DisplayTerminal for AuthorDetail {
    fn fmt_to_string(&self, config: &Config) -> String {
        let name = self.name().unwrap_or("Unknown author");
        let mut s = config.output_author.format_str(name);
        match (self.birth_date(), self.death_date()) {
            (Some(born), Some(died)) => write!(s, " {born} – {died}").ok(),
            (Some(born), None) => write!(s, " born {born}").ok(),
            _ => None,
        };
        s
    }
}

impl DisplayTerminal for BookCardDetail {
    fn fmt_to_string(&self, config: &Config) -> String {
        let mut s = match &self.work {
            Some(work) => work.fmt_to_string(config),
            None => config.output_notice.format_str("Book details not available."),
        };
        if let Some(author) = &self.author {
            write!(s, "\n\n{}", author.fmt_to_string(config)).ok();
        }
        s
    }
}

impl DisplayTerminal for SearchMatch {
    fn fmt_to_string(&self, config: &Config) -> String {
        let page = match self.page() {
            Some(page) => page.to_string(),
            None => "N/A".to_string(),
        };
        format!(
            "{} {}",
            config.output_page.format_str(page),
            config.output_match.format_str(&self.text)
        )
    }
}

impl DisplayTerminal for InsideResults {
    fn fmt_to_string(&self, config: &Config) -> String {
        if self.matches.is_empty() {
            return "No results found".to_string();
        }
        self.matches
            .iter()
            .map(|x| x.fmt_to_string(config))
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl DisplayTerminal for SubjectBooks {
    fn fmt_to_string(&self, config: &Config) -> String {
        let mut s = config
            .output_title
            .format_str(self.name.as_deref().unwrap_or("Subject"));
        if let Some(count) = self.work_count {
            write!(s, " ({count} works)").ok();
        }
        for work in &self.works {
            let title = work.title.as_deref().unwrap_or("Untitled");
            write!(s, "\n{}", config.output_title.format_str(title)).ok();
            let names = work
                .authors
                .iter()
                .filter_map(|x| x.name.as_deref())
                .collect::<Vec<&str>>();
            if !names.is_empty() {
                write!(s, " {}", config.output_author.format_vec(&names)).ok();
            }
            if let Some(cover) = work.cover_id.and_then(known_cover_id) {
                let url = cover_url(cover, CoverSize::Small);
                write!(s, " {}", config.output_cover.format_str(url)).ok();
            }
            write!(s, " {}", config.output_key.format_str(&work.key)).ok();
        }
        s
    }
}

impl DisplayTerminal for ReadingLog {
    fn fmt_to_string(&self, config: &Config) -> String {
        if self.reading_log_entries.is_empty() {
            return "Shelf is empty".to_string();
        }
        self.reading_log_entries
            .iter()
            .map(|entry| {
                let title = entry
                    .work
                    .as_ref()
                    .and_then(|x| x.get("title"))
                    .and_then(|x| x.as_str())
                    .unwrap_or("Untitled");
                let mut s = config.output_title.format_str(title);
                if let Some(date) = &entry.logged_date {
                    write!(s, " {}", config.output_year.format_str(date)).ok();
                }
                s
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl DisplayTerminal for BookData {
    fn fmt_to_string(&self, config: &Config) -> String {
        let mut s = config
            .output_title
            .format_str(self.title.as_deref().unwrap_or("Untitled"));
        if let Some(authors) = &self.authors {
            let names = authors.iter().map(|x| x.name.as_str()).collect::<Vec<&str>>();
            write!(s, " {}", config.output_author.format_vec(&names)).ok();
        }
        if let Some(publishers) = &self.publishers {
            let names = publishers
                .iter()
                .filter_map(|x| x.name.as_deref())
                .collect::<Vec<&str>>();
            write!(s, " {}", config.output_publisher.format_vec(&names)).ok();
        }
        if let Some(date) = &self.publish_date {
            write!(s, " {}", config.output_year.format_str(date)).ok();
        }
        if let Some(pages) = self.number_of_pages {
            write!(s, " {}", config.output_page_count.format_str(pages)).ok();
        }
        write!(s, " {}", config.output_key.format_str(&self.key)).ok();
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::work::Description;

    #[test]
    fn missing_description_is_reported() {
        let work = WorkDetail {
            key: "/works/OL45883W".into(),
            title: Some("Fantastic Mr Fox".into()),
            ..WorkDetail::default()
        };
        let s = work.fmt_to_string(&Config::default());
        assert!(s.contains("Fantastic Mr Fox"));
        assert!(s.contains("No description available."));
    }

    #[test]
    fn typed_description_is_rendered() {
        let work = WorkDetail {
            key: "/works/OL45883W".into(),
            description: Some(Description::Simple("A fox outwits three farmers.".into())),
            ..WorkDetail::default()
        };
        assert!(work
            .fmt_to_string(&Config::default())
            .contains("A fox outwits three farmers."));
    }

    #[test]
    fn match_without_paragraph_has_no_page() {
        let m = SearchMatch {
            text: "Big Brother".into(),
            par:  vec![],
        };
        assert!(m.fmt_to_string(&Config::default()).contains("N/A"));
    }
}
