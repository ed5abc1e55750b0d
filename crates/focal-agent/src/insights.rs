//! Dashboard insights prompt.
//!
//! Summarizes the task list and recent file-search hits (with short
//! snippets) into a single user prompt, caps everything so the prompt
//! stays small, and asks for a fixed output shape.

use std::path::Path;

use focal_llm::{ChatMessage, ChatProvider, ProviderError};
use focal_search::{FileHit, read_snippet};
use focal_store::Task;

const SYSTEM_PROMPT: &str = "You are an assistant that helps a user manage daily tasks and extract insights from local files.\n\
Be practical, concise, and action-oriented.\n\
If you suggest file actions, describe them clearly but do not fabricate file contents beyond what is shown.\n";

const MAX_OPEN_TASKS: usize = 20;
const MAX_DONE_TASKS: usize = 10;
const MAX_HITS: usize = 10;
const MAX_HIT_LINE_CHARS: usize = 200;
const SNIPPET_RADIUS: usize = 2;
const MAX_SNIPPET_LINES: usize = 8;

/// Everything the insights prompt draws on.
pub struct InsightsInput<'a> {
    /// All tasks, newest first.
    pub tasks: &'a [Task],
    /// Hits from the most recent file search.
    pub hits: &'a [FileHit],
    /// Root the hits were searched under; used to relativize paths.
    pub root_dir: &'a Path,
}

/// Build the user prompt for an insights request.
#[must_use]
pub fn build_insights_prompt(input: &InsightsInput<'_>, question: &str) -> String {
    let open: Vec<&Task> = input.tasks.iter().filter(|t| t.is_open()).collect();
    let done: Vec<&Task> = input.tasks.iter().filter(|t| !t.is_open()).collect();

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("Root folder: {}", input.root_dir.display()));
    lines.push(String::new());
    lines.push("Tasks:".to_string());
    lines.push(format!("- Open: {}", open.len()));
    for task in open.iter().take(MAX_OPEN_TASKS) {
        lines.push(format!("  - {}", task.title));
    }
    if open.len() > MAX_OPEN_TASKS {
        lines.push("  - ...".to_string());
    }
    lines.push(format!(
        "- Completed (recent): {}",
        done.len().min(MAX_DONE_TASKS)
    ));
    for task in done.iter().take(MAX_DONE_TASKS) {
        lines.push(format!("  - {}", task.title));
    }

    lines.push(String::new());
    lines.push(format!("File search hits shown: {}", input.hits.len()));
    for hit in input.hits.iter().take(MAX_HITS) {
        let rel = hit.path.strip_prefix(input.root_dir).unwrap_or(&hit.path);
        let shown: String = hit.line.chars().take(MAX_HIT_LINE_CHARS).collect();
        lines.push(format!("- {}:{}: {}", rel.display(), hit.line_no, shown));
        let snippet = read_snippet(&hit.path, hit.line_no, SNIPPET_RADIUS);
        if !snippet.is_empty() {
            lines.push("  Snippet:".to_string());
            for sline in snippet.lines().take(MAX_SNIPPET_LINES) {
                lines.push(format!("  {sline}"));
            }
        }
    }

    lines.push(String::new());
    lines.push("User question:".to_string());
    let question = question.trim();
    lines.push(
        if question.is_empty() {
            "Give me insights and next steps."
        } else {
            question
        }
        .to_string(),
    );

    lines.push(String::new());
    lines.push(
        "Output format:\n\
         1) Top 5 actionable priorities for today\n\
         2) File/data insights (if any)\n\
         3) Suggested next searches or questions\n"
            .to_string(),
    );
    lines.join("\n")
}

/// Run an insights request through the provider.
#[tracing::instrument(skip_all, fields(provider = %provider.name()))]
pub async fn generate_insights(
    provider: &dyn ChatProvider,
    input: &InsightsInput<'_>,
    question: &str,
) -> Result<String, ProviderError> {
    let messages = [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_insights_prompt(input, question)),
    ];
    provider.chat(&messages).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::io::Write as _;
    use std::path::PathBuf;

    fn task(title: &str, done: bool) -> Task {
        Task {
            id: format!("id-{title}"),
            title: title.to_string(),
            created_at: Utc::now(),
            completed_at: done.then(Utc::now),
        }
    }

    #[test]
    fn prompt_caps_open_task_listing() {
        let tasks: Vec<Task> = (0..25).map(|i| task(&format!("task {i}"), false)).collect();
        let input = InsightsInput {
            tasks: &tasks,
            hits: &[],
            root_dir: Path::new("/tmp/root"),
        };
        let prompt = build_insights_prompt(&input, "");
        assert!(prompt.contains("- Open: 25"));
        assert!(prompt.contains("task 19"));
        assert!(!prompt.contains("task 20\n"));
        assert!(prompt.contains("  - ..."));
        assert!(prompt.contains("Give me insights and next steps."));
    }

    #[test]
    fn prompt_relativizes_hit_paths_and_adds_snippets() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        let mut f = std::fs::File::create(&file).unwrap();
        for i in 1..=6 {
            writeln!(f, "line {i}").unwrap();
        }

        let hits = vec![FileHit {
            path: file,
            line_no: 3,
            line: "line 3".to_string(),
        }];
        let input = InsightsInput {
            tasks: &[],
            hits: &hits,
            root_dir: dir.path(),
        };
        let prompt = build_insights_prompt(&input, "what matters?");
        assert!(prompt.contains("- notes.txt:3: line 3"));
        assert!(prompt.contains("  Snippet:"));
        assert!(prompt.contains(">>"));
        assert!(prompt.contains("what matters?"));
    }

    #[test]
    fn hit_lines_are_truncated() {
        let long = "x".repeat(500);
        let hits = vec![FileHit {
            path: PathBuf::from("/nowhere/big.txt"),
            line_no: 1,
            line: long,
        }];
        let input = InsightsInput {
            tasks: &[],
            hits: &hits,
            root_dir: Path::new("/nowhere"),
        };
        let prompt = build_insights_prompt(&input, "");
        let hit_line = prompt.lines().find(|l| l.starts_with("- big.txt")).unwrap();
        assert!(hit_line.len() < 250);
    }
}
