//! Sources of training problems.
//!
//! A [`ProblemSource`] turns a seed problem into a batch of similar problems.
//! Every source returns normalized, non-empty lines.
use crate::error::AppError;
use algebrl_algebra::normalize_problem_text;
use anyhow::{Context, Result};
use log::{debug, info};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// An integer literal, with the power operator in front of it if it is an exponent.
static INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<exp>(?:\^|\*\*)\s*)?\d+").unwrap());

/// Produces problems similar to a seed problem.
pub trait ProblemSource {
    /// Returns at most `n` problems similar to `seed`.
    fn problems(&self, seed: &str, n: usize) -> Result<Vec<String>>;
}

/// Normalizes every line of `text`, drops empty lines and keeps the first `n`.
pub fn parse_problem_lines(text: &str, n: usize) -> Vec<String> {
    text.lines()
        .map(normalize_problem_text)
        .filter(|p| !p.is_empty())
        .take(n)
        .collect()
}

/// Asks an OpenAI-compatible chat endpoint for problems.
pub struct ChatProblemGenerator {
    api_key: String,
    model: String,
    base_url: String,
}

/// Endpoint of Groq's OpenAI-compatible API.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Model asked for problems by default.
pub const DEFAULT_CHAT_MODEL: &str = "openai/gpt-oss-120b";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatContent,
}

#[derive(Deserialize)]
struct ChatContent {
    content: Option<String>,
}

impl ChatProblemGenerator {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Reads the key from `GROQ_API_KEY` and talks to Groq.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_VAR).map_err(|_| AppError::MissingApiKey(API_KEY_VAR))?;
        Ok(Self::new(api_key, DEFAULT_CHAT_MODEL, GROQ_BASE_URL))
    }

    /// The request text for `n` problems like `seed`.
    pub fn prompt(seed: &str, n: usize) -> String {
        format!(
            "Generate {} math problems similar to this equation.\n\
             Keep same structure, change only numbers.\n\
             Return one problem per line.\n\
             \n\
             Problem:\n\
             {}\n",
            n, seed
        )
    }

    fn complete(&self, prompt: &str) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(AppError::MissingApiKey(API_KEY_VAR).into());
        }
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let url = format!("{}/chat/completions", self.base_url);
        debug!("POST {}", url);

        let response = reqwest::blocking::Client::new()
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            }
            .into());
        }

        let response: ChatResponse = response.json()?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AppError::EmptyResponse.into())
    }
}

impl ProblemSource for ChatProblemGenerator {
    fn problems(&self, seed: &str, n: usize) -> Result<Vec<String>> {
        info!("Ask {} for {} problems", self.model, n);
        let text = self.complete(&Self::prompt(seed, n))?;
        Ok(parse_problem_lines(&text, n))
    }
}

/// Reads problems from a file, one per line. The seed problem is ignored.
pub struct FileProblemSource {
    path: PathBuf,
}

impl FileProblemSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ProblemSource for FileProblemSource {
    fn problems(&self, _seed: &str, n: usize) -> Result<Vec<String>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read problems from {:?}", self.path))?;
        Ok(parse_problem_lines(&text, n))
    }
}

/// Keeps the structure of the seed problem and draws every coefficient and
/// constant uniformly from 1 to 12. Exponents are kept.
pub struct TemplateProblemSource {
    seed: u64,
}

impl TemplateProblemSource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl ProblemSource for TemplateProblemSource {
    fn problems(&self, seed: &str, n: usize) -> Result<Vec<String>> {
        let template = normalize_problem_text(seed);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let problems = (0..n)
            .map(|_| {
                INTEGER
                    .replace_all(&template, |caps: &regex::Captures| match caps.name("exp") {
                        Some(_) => caps[0].to_string(),
                        None => rng.gen_range(1..=12).to_string(),
                    })
                    .into_owned()
            })
            .collect();
        Ok(problems)
    }
}
