//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::config::HighlightConfig;
use crate::error::{Error, Result};

/// Class prefix for the token spans inside highlighted code
const TOKEN_CLASS_PREFIX: &str = "hljs-";

/// Rendering options, fixed for the lifetime of a renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Enable GitHub-flavored Markdown extensions
    pub gfm: bool,
    /// Highlight fenced and indented code blocks
    pub highlight: bool,
    /// Guess the language of code blocks that do not name one
    pub auto_detect: bool,
    /// Prepended to the language in the `<code>` class attribute
    pub lang_prefix: String,
    /// Theme for [`MarkdownRenderer::stylesheet`]
    pub theme: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&HighlightConfig::default())
    }
}

impl From<&HighlightConfig> for RenderOptions {
    fn from(config: &HighlightConfig) -> Self {
        Self {
            gfm: config.gfm,
            highlight: config.enable,
            auto_detect: config.auto_detect,
            lang_prefix: config.lang_prefix.clone(),
            theme: config.theme.clone(),
        }
    }
}

/// Markdown renderer with syntax highlighting
///
/// Rendering only borrows the renderer, so one instance can be shared
/// between threads.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a renderer with the given options
    pub fn new(options: RenderOptions) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            options,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// CSS for the token classes emitted by [`render`](Self::render)
    pub fn stylesheet(&self) -> Result<String> {
        let theme_set = ThemeSet::load_defaults();
        let theme = theme_set.themes.get(&self.options.theme).ok_or_else(|| {
            Error::Render(format!("unknown highlight theme: {}", self.options.theme))
        })?;

        css_for_theme_with_class_style(
            theme,
            ClassStyle::SpacedPrefixed {
                prefix: TOKEN_CLASS_PREFIX,
            },
        )
        .map_err(|e| Error::Render(e.to_string()))
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = if self.options.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        };
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(info) => fence_language(&info),
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let block = self.code_block(&code_block_content, code_block_lang.as_deref())?;
                    events.push(Event::Html(CowStr::from(block)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Render a single code block, highlighted when a syntax is known
    fn code_block(&self, code: &str, lang: Option<&str>) -> Result<String> {
        if !self.options.highlight {
            return Ok(self.plain_code_block(code, lang));
        }

        let syntax = match lang {
            Some(lang) => self.syntax_set.find_syntax_by_token(lang),
            None if self.options.auto_detect => self.detect_syntax(code),
            None => None,
        };

        let Some(syntax) = syntax else {
            return Ok(self.plain_code_block(code, lang));
        };

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed {
                prefix: TOKEN_CLASS_PREFIX,
            },
        );
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| Error::Render(e.to_string()))?;
        }

        let class_lang = lang
            .map(str::to_string)
            .unwrap_or_else(|| syntax_token(syntax));

        Ok(format!(
            "<pre><code class=\"{}{}\">{}</code></pre>\n",
            self.options.lang_prefix,
            html_escape(&class_lang),
            generator.finalize()
        ))
    }

    fn plain_code_block(&self, code: &str, lang: Option<&str>) -> String {
        match lang {
            Some(lang) => format!(
                "<pre><code class=\"{}{}\">{}</code></pre>\n",
                self.options.lang_prefix,
                html_escape(lang),
                html_escape(code)
            ),
            None => format!("<pre><code>{}</code></pre>\n", html_escape(code)),
        }
    }

    /// Guess a syntax from the first line (shebangs, `<?php`, `<?xml`, modelines)
    fn detect_syntax(&self, code: &str) -> Option<&SyntaxReference> {
        let first_line = code.lines().next()?;
        let plain = self.syntax_set.find_syntax_plain_text();
        self.syntax_set
            .find_syntax_by_first_line(first_line)
            .filter(|syntax| syntax.name != plain.name)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// First word of a fence info string (` ```rust,ignore ` -> `rust`)
fn fence_language(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}

/// Short name for a detected syntax, used in the `<code>` class
fn syntax_token(syntax: &SyntaxReference) -> String {
    syntax
        .file_extensions
        .first()
        .cloned()
        .unwrap_or_else(|| syntax.name.to_lowercase())
}

/// Simple HTML escaping
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
