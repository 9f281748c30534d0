use std::{borrow::Cow, path::PathBuf};

use anyhow::Result;
use crossterm::style::Stylize;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::default_colors::*;

pub const CONFIG_FILE: &str = "openshelf.toml";
pub const ENV_PREFIX: &str = "OPENSHELF_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    bold:   bool,
    italic: bool,
    color:  crossterm::style::Color,
}

impl StyleConfig {
    fn style(&self, s: impl ToString) -> String {
        let mut s = s.to_string().with(self.color);
        if self.bold {
            s = s.bold();
        }
        if self.italic {
            s = s.italic();
        }
        s.to_string()
    }
}

pub trait Styleable {
    fn style(&self, c: &StyleConfig) -> String;
}

impl<T> Styleable for T
where
    T: ToString + std::fmt::Display,
{
    fn style(&self, c: &StyleConfig) -> String {
        c.style(self)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color:  COLOR_WHITE,
            bold:   false,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub prefix:            String,
    pub suffix:            String,
    pub description:       String,
    pub separator:         String,
    pub style_prefix:      StyleConfig,
    pub style_suffix:      StyleConfig,
    pub style_description: StyleConfig,
    pub style_separator:   StyleConfig,
    pub style_content:     StyleConfig,
}

impl OutputConfig {
    pub fn format_str(&self, content: impl ToString) -> String {
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        let content = content.to_string().style(&self.style_content);
        if self.description.is_empty() {
            return format!("{prefix}{content}{suffix}");
        }
        let description = self.description.style(&self.style_description);
        format!("{prefix}{description} {content}{suffix}")
    }

    pub fn format_vec<T: std::fmt::Display>(&self, content: &[T]) -> String {
        let separator = self.separator.style(&self.style_separator);
        let joined = content
            .iter()
            .map(|x| x.style(&self.style_content))
            .collect::<Vec<String>>()
            .join(&separator);
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        if self.description.is_empty() {
            return format!("{prefix}{joined}{suffix}");
        }
        let description = self.description.style(&self.style_description);
        format!("{prefix}{description} {joined}{suffix}")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix:            "[".into(),
            suffix:            "]".into(),
            description:       "".into(),
            separator:         ", ".into(),
            style_prefix:      StyleConfig::default(),
            style_suffix:      StyleConfig::default(),
            style_description: StyleConfig {
                italic: true,
                ..StyleConfig::default()
            },
            style_separator:   StyleConfig::default(),
            style_content:     StyleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root of the bibliographic service.
    pub openlibrary_url:     String,
    /// Root of the archive service, serving `metadata/{item}`.
    pub archive_url:         String,
    /// Full-text search endpoint; `{shard}` is replaced by the item's host.
    pub fulltext_url:        String,
    pub user_agent:          String,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy:        bool,
    pub history_file:        PathBuf,
    pub server_address:      String,
    pub output_key:          OutputConfig,
    pub output_title:        OutputConfig,
    pub output_author:       OutputConfig,
    pub output_year:         OutputConfig,
    pub output_publisher:    OutputConfig,
    pub output_language:     OutputConfig,
    pub output_page_count:   OutputConfig,
    pub output_subject:      OutputConfig,
    pub output_cover:        OutputConfig,
    pub output_availability: OutputConfig,
    pub output_description:  OutputConfig,
    pub output_excerpt:      OutputConfig,
    pub output_edition:      OutputConfig,
    pub output_match:        OutputConfig,
    pub output_page:         OutputConfig,
    pub output_notice:       OutputConfig,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    /// Defaults, then `openshelf.toml`, then `OPENSHELF_*` variables.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn read_config() -> Result<Self> {
        Ok(Self::figment().extract()?)
    }

    pub fn history_path(&self) -> Cow<'_, std::path::Path> {
        shellexpand::path::tilde(&self.history_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openlibrary_url:     "https://openlibrary.org".into(),
            archive_url:         "https://archive.org".into(),
            fulltext_url:        "https://{shard}.us.archive.org/fulltext/inside.php".into(),
            user_agent:          concat!("openshelf/", env!("CARGO_PKG_VERSION")).into(),
            system_proxy:        true,
            history_file:        PathBuf::from("~/.local/share/openshelf/history.txt"),
            server_address:      "127.0.0.1:3000".into(),
            output_key:          OutputConfig {
                prefix: "(".into(),
                suffix: ")".into(),
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_title:        OutputConfig {
                prefix: "".into(),
                suffix: "".into(),
                style_content: StyleConfig {
                    color: COLOR_TITLE,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_author:       OutputConfig {
                description: "Written by:".into(),
                separator: " and ".into(),
                style_content: StyleConfig {
                    color: COLOR_AUTHOR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_year:         OutputConfig {
                description: "Published:".into(),
                style_content: StyleConfig {
                    color: COLOR_YEAR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_publisher:    OutputConfig {
                description: "Publisher:".into(),
                style_content: StyleConfig {
                    color: COLOR_PUBLISHER,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_language:     OutputConfig {
                description: "Written in:".into(),
                separator: " and ".into(),
                style_content: StyleConfig {
                    color: COLOR_LANGUAGE,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_page_count:   OutputConfig {
                description: "Page count:".into(),
                style_content: StyleConfig {
                    color: COLOR_PAGE_COUNT,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_subject:      OutputConfig {
                description: "Subjects:".into(),
                style_content: StyleConfig {
                    color: COLOR_SUBJECT,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_cover:        OutputConfig {
                description: "Cover:".into(),
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_availability: OutputConfig {
                description: "Availability:".into(),
                style_content: StyleConfig {
                    color: COLOR_AVAILABLE,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_description:  OutputConfig {
                prefix: "".into(),
                suffix: "".into(),
                ..OutputConfig::default()
            },
            output_excerpt:      OutputConfig {
                prefix: "> ".into(),
                suffix: "".into(),
                style_content: StyleConfig {
                    italic: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_edition:      OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_PUBLISHER,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_match:        OutputConfig {
                prefix: "".into(),
                suffix: "".into(),
                style_content: StyleConfig {
                    color: COLOR_MATCH,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_page:         OutputConfig {
                description: "Page".into(),
                style_content: StyleConfig {
                    color: COLOR_PAGE_COUNT,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_notice:       OutputConfig {
                description: "Error".into(),
                style_content: StyleConfig {
                    color: COLOR_NOTICE,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
        }
    }
}
