//! `wp_edit_block_file`: edit a source file of a Gutenberg block plugin
//!
//! Four operations are supported:
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | `write` | replace the file with `content` |
//! | `append` | add `content` on a new line at the end |
//! | `modify` | regex replace every `searchValue` match with `replaceValue` |
//! | `smart_modify` | like `write`, but placeholder comments such as `// ...` or `// rest of code remains the same` are filled in from the current file |
//!
//! After a successful write the block is rebuilt.

use std::str::FromStr;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::{Regex, RegexSet};
use wpmcp_application::ports::tool_handler::{ToolContext, ToolHandler};
use wpmcp_domain::tool::{ToolCall, ToolCategory, ToolDefinition, ToolError, ToolParameter, ToolResult};

use super::{block_plugin_dir, relative_path};
use crate::tools::build::BlockBuilder;

pub const EDIT_BLOCK_FILE: &str = "wp_edit_block_file";

/// Comment forms meaning "keep the existing code here"
const KEEP_CODE_PATTERNS: [&str; 6] = [
    r"(?i)// *(?:rest of|remaining|other) code (?:remains |stays )?(?:the )?same",
    r"// *\.\.\.",
    r"/\* *\.\.\.? *\*/",
    r"\{?\s*\.\.\.\s*\}?",
    r"(?i)// *no changes",
    r"(?i)// *unchanged",
];

static KEEP_CODE: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(KEEP_CODE_PATTERNS).unwrap_or_else(|e| {
        tracing::error!("Invalid placeholder pattern: {}", e);
        RegexSet::empty()
    })
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOperation {
    Write,
    Append,
    Modify,
    SmartModify,
}

impl EditOperation {
    pub const ALL: [EditOperation; 4] = [
        EditOperation::Write,
        EditOperation::Append,
        EditOperation::Modify,
        EditOperation::SmartModify,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            EditOperation::Write => "write",
            EditOperation::Append => "append",
            EditOperation::Modify => "modify",
            EditOperation::SmartModify => "smart_modify",
        }
    }
}

impl FromStr for EditOperation {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ToolError::invalid_argument(format!("Unknown operation: {}", s)))
    }
}

fn has_code_placeholder(text: &str) -> bool {
    KEEP_CODE.is_match(text)
}

/// Fill placeholder lines in `new_content` with the matching span of `original`.
///
/// For a placeholder line, the lines directly before and after it anchor
/// the span: the first original line containing the previous line starts
/// it, the next original line containing the following line ends it. When
/// no span is found the placeholder is dropped together with the line that
/// follows it.
pub fn merge_with_existing_code(original: &str, new_content: &str) -> String {
    if !has_code_placeholder(new_content) {
        return new_content.to_string();
    }

    let original_lines: Vec<&str> = original.split('\n').collect();
    let new_lines: Vec<&str> = new_content.split('\n').collect();
    let mut result: Vec<&str> = Vec::with_capacity(original_lines.len());
    let mut keeping_original = false;

    for (i, line) in new_lines.iter().enumerate() {
        if has_code_placeholder(line) {
            if i > 0 && i < new_lines.len() - 1 {
                let previous = new_lines[i - 1];
                let next = new_lines[i + 1];

                let start = original_lines.iter().position(|l| l.contains(previous));
                let span = start.and_then(|start| {
                    original_lines
                        .iter()
                        .enumerate()
                        .skip(start + 1)
                        .find(|(_, l)| l.contains(next))
                        .map(|(end, _)| (start, end))
                });

                if let Some((start, end)) = span {
                    result.extend_from_slice(&original_lines[start + 1..end]);
                    continue;
                }
            }
            keeping_original = true;
            continue;
        }

        if keeping_original {
            keeping_original = false;
        } else {
            result.push(line);
        }
    }

    result.join("\n")
}

/// Compute the new file content for `operation`
fn apply_operation(
    operation: EditOperation,
    original: &str,
    call: &ToolCall,
) -> Result<String, ToolError> {
    let content = || {
        call.get_string("content")
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                ToolError::invalid_argument(format!(
                    "Content is required for {} operation",
                    operation.as_str()
                ))
            })
    };

    match operation {
        EditOperation::SmartModify => Ok(merge_with_existing_code(original, content()?)),
        EditOperation::Write => Ok(content()?.to_string()),
        EditOperation::Append => Ok(format!("{}\n{}", original, content()?)),
        EditOperation::Modify => {
            let (Some(search), Some(replace)) =
                (call.get_string("searchValue"), call.get_string("replaceValue"))
            else {
                return Err(ToolError::invalid_argument(
                    "searchValue and replaceValue are required for modify operation",
                ));
            };
            if search.is_empty() {
                return Err(ToolError::invalid_argument("searchValue cannot be empty"));
            }
            let regex = Regex::new(search).map_err(|e| {
                ToolError::invalid_argument(format!("Invalid searchValue pattern: {}", e))
            })?;
            Ok(regex.replace_all(original, replace).into_owned())
        }
    }
}

/// `wp_edit_block_file`
pub struct EditBlockFileTool {
    builder: BlockBuilder,
}

impl EditBlockFileTool {
    pub fn new(builder: BlockBuilder) -> Self {
        Self { builder }
    }
}

#[async_trait]
impl ToolHandler for EditBlockFileTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            EDIT_BLOCK_FILE,
            "Edits a common file in WordPress Gutenberg Block Plugin with automatic rebuild detection",
            ToolCategory::Filesystem,
        )
        .with_parameter(ToolParameter::new(
            "blockPluginDirname",
            "Block plugin directory name.",
            true,
        ))
        .with_parameter(ToolParameter::new(
            "filePath",
            "Path to the file relative to the plugin root.",
            true,
        ))
        .with_parameter(
            ToolParameter::new("operation", "Operation to perform on the file", true)
                .with_allowed_values(EditOperation::ALL.iter().map(|op| op.as_str())),
        )
        .with_parameter(ToolParameter::new("content", "New content for the file", false))
        .with_parameter(ToolParameter::new(
            "searchValue",
            "Text to search for when using modify operation",
            false,
        ))
        .with_parameter(ToolParameter::new(
            "replaceValue",
            "Text to replace with when using modify operation",
            false,
        ))
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let dirname = call
            .require_string("blockPluginDirname")
            .map_err(ToolError::invalid_argument)?;
        let file_path = call
            .require_string("filePath")
            .map_err(ToolError::invalid_argument)?;
        let operation: EditOperation = call
            .require_string("operation")
            .map_err(ToolError::invalid_argument)?
            .parse()?;

        let block_dir = block_plugin_dir(&context.site.plugins_path, dirname).await?;
        if file_path.ends_with("block.json") {
            return Err(ToolError::invalid_argument(
                "This tool cannot edit block.json file. Please use another tool: wp_edit_block_json_file instead and try again.",
            ));
        }
        if file_path.contains("/build/") || file_path.starts_with("build/") {
            return Err(ToolError::invalid_argument(
                "Files within \"build\" directory shouldn't be edited directly.",
            ));
        }
        let full_path = block_dir.join(relative_path("filePath", file_path)?);

        if !full_path.is_file() {
            return Err(ToolError::new(
                ToolError::NOT_FOUND,
                format!("File not found: {}", full_path.display()),
            ));
        }
        let original = tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|e| ToolError::execution_failed(format!("Failed to read file: {}", e)))?;

        let updated = apply_operation(operation, &original, call)?;
        tokio::fs::write(&full_path, updated)
            .await
            .map_err(|e| ToolError::execution_failed(format!("Failed to write file: {}", e)))?;
        tracing::info!(
            file = %full_path.display(),
            operation = operation.as_str(),
            "Block file edited"
        );

        match self.builder.build(&block_dir, dirname).await {
            Ok(summary) => Ok(ToolResult::text(format!(
                "Block file: {} edited successfully.\n\nBuild output:\n{}",
                full_path.display(),
                summary
            ))),
            Err(e) => Err(ToolError::execution_failed(format!(
                "Block file: {} edited but build failed: {}. Please try build again or check error logs on your own.",
                full_path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_patterns() {
        assert!(has_code_placeholder("// ..."));
        assert!(has_code_placeholder("  // Rest of code remains the same"));
        assert!(has_code_placeholder("// other code stays the same"));
        assert!(has_code_placeholder("/* .. */"));
        assert!(has_code_placeholder("// No changes"));
        assert!(has_code_placeholder("{ ... }"));
        assert!(!has_code_placeholder("const a = 1;"));
        assert!(!has_code_placeholder("// keep this comment"));
    }

    #[test]
    fn test_merge_without_placeholder_returns_new_content() {
        assert_eq!(merge_with_existing_code("old", "new\ncontent"), "new\ncontent");
    }

    #[test]
    fn test_merge_fills_span_from_original() {
        let original = "import a;\nfunction edit() {\n  one();\n  two();\n  return x;\n}";
        let new_content = "import b;\nfunction edit() {\n  // ...\n  return x;\n}";

        assert_eq!(
            merge_with_existing_code(original, new_content),
            "import b;\nfunction edit() {\n  one();\n  two();\n  return x;\n}"
        );
    }

    #[test]
    fn test_merge_unresolved_placeholder_drops_following_line() {
        let original = "a\nb\nc";
        let new_content = "x\n// rest of code remains the same\ny\nz";

        assert_eq!(merge_with_existing_code(original, new_content), "x\nz");
    }

    #[test]
    fn test_merge_placeholder_on_first_line() {
        let original = "a\nb";
        let new_content = "// ...\nkept\nalso kept";
        assert_eq!(merge_with_existing_code(original, new_content), "also kept");
    }

    #[test]
    fn test_apply_operations() {
        let call = ToolCall::new(EDIT_BLOCK_FILE).with_arg("content", "tail");
        assert_eq!(
            apply_operation(EditOperation::Append, "head", &call).unwrap(),
            "head\ntail"
        );
        assert_eq!(
            apply_operation(EditOperation::Write, "head", &call).unwrap(),
            "tail"
        );

        let call = ToolCall::new(EDIT_BLOCK_FILE)
            .with_arg("searchValue", "col(o|ou)r")
            .with_arg("replaceValue", "hue");
        assert_eq!(
            apply_operation(EditOperation::Modify, "color and colour", &call).unwrap(),
            "hue and hue"
        );
    }

    #[test]
    fn test_apply_operation_missing_arguments() {
        let call = ToolCall::new(EDIT_BLOCK_FILE);
        let err = apply_operation(EditOperation::SmartModify, "x", &call).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.message, "Content is required for smart_modify operation");

        let call = ToolCall::new(EDIT_BLOCK_FILE).with_arg("searchValue", "x");
        let err = apply_operation(EditOperation::Modify, "x", &call).unwrap_err();
        assert_eq!(
            err.message,
            "searchValue and replaceValue are required for modify operation"
        );

        let call = ToolCall::new(EDIT_BLOCK_FILE)
            .with_arg("searchValue", "(")
            .with_arg("replaceValue", "y");
        assert!(apply_operation(EditOperation::Modify, "x", &call).is_err());
    }

    #[test]
    fn test_operation_parse() {
        assert_eq!(
            "smart_modify".parse::<EditOperation>().unwrap(),
            EditOperation::SmartModify
        );
        assert!("delete".parse::<EditOperation>().is_err());
    }

    #[cfg(unix)]
    mod with_filesystem {
        use super::*;
        use crate::tools::build::test_support::{fake_program, passing_npm};
        use crate::tools::filesystem::test_support::create_block_plugin;
        use crate::tools::process::CommandRunner;
        use std::time::Duration;
        use wpmcp_domain::Site;

        fn tool(npm: &std::path::Path) -> EditBlockFileTool {
            EditBlockFileTool::new(BlockBuilder::new(
                CommandRunner::new(Duration::from_secs(10)),
                npm.to_string_lossy(),
            ))
        }

        #[tokio::test]
        async fn test_edit_writes_and_rebuilds() {
            let bin = tempfile::tempdir().unwrap();
            let plugins = tempfile::tempdir().unwrap();
            let block = create_block_plugin(plugins.path(), "my-block");
            std::fs::write(block.join("src/edit.js"), "export default 1;").unwrap();

            let site = Site::new("Blog", "/srv/blog", plugins.path(), "http://blog.test/wp-json");
            let context = ToolContext::new("blog", &site);
            let call = ToolCall::new(EDIT_BLOCK_FILE)
                .with_arg("blockPluginDirname", "my-block")
                .with_arg("filePath", "src/edit.js")
                .with_arg("operation", "append")
                .with_arg("content", "export const two = 2;");

            let result = tool(&passing_npm(bin.path()))
                .execute(&call, &context)
                .await
                .unwrap();

            assert_eq!(
                std::fs::read_to_string(block.join("src/edit.js")).unwrap(),
                "export default 1;\nexport const two = 2;"
            );
            let text = result.text_content();
            assert!(text.contains("edited successfully.\n\nBuild output:\n✅ Block \"my-block\" built successfully!"));
        }

        #[tokio::test]
        async fn test_edit_reports_build_failure_after_writing() {
            let bin = tempfile::tempdir().unwrap();
            let plugins = tempfile::tempdir().unwrap();
            let block = create_block_plugin(plugins.path(), "my-block");
            std::fs::write(block.join("src/edit.js"), "old").unwrap();
            let npm = fake_program(bin.path(), "npm", "echo 'npm ERR! broken' >&2\nexit 1");

            let site = Site::new("Blog", "/srv/blog", plugins.path(), "http://blog.test/wp-json");
            let context = ToolContext::new("blog", &site);
            let call = ToolCall::new(EDIT_BLOCK_FILE)
                .with_arg("blockPluginDirname", "my-block")
                .with_arg("filePath", "src/edit.js")
                .with_arg("operation", "write")
                .with_arg("content", "new");

            let err = tool(&npm).execute(&call, &context).await.unwrap_err();
            assert_eq!(std::fs::read_to_string(block.join("src/edit.js")).unwrap(), "new");
            assert!(err.message.contains("edited but build failed: npm install failed"));
        }

        #[tokio::test]
        async fn test_edit_guards() {
            let plugins = tempfile::tempdir().unwrap();
            let block = create_block_plugin(plugins.path(), "my-block");
            std::fs::create_dir_all(block.join("build")).unwrap();
            let site = Site::new("Blog", "/srv/blog", plugins.path(), "http://blog.test/wp-json");
            let context = ToolContext::new("blog", &site);
            let tool = tool(std::path::Path::new("npm"));

            let call = |file: &str| {
                ToolCall::new(EDIT_BLOCK_FILE)
                    .with_arg("blockPluginDirname", "my-block")
                    .with_arg("filePath", file)
                    .with_arg("operation", "write")
                    .with_arg("content", "x")
            };

            let err = tool.execute(&call("src/block.json"), &context).await.unwrap_err();
            assert!(err.message.contains("wp_edit_block_json_file"));

            let err = tool.execute(&call("build/index.js"), &context).await.unwrap_err();
            assert_eq!(err.message, "Files within \"build\" directory shouldn't be edited directly.");

            let err = tool.execute(&call("src/missing.js"), &context).await.unwrap_err();
            assert_eq!(err.code, ToolError::NOT_FOUND);
            assert!(err.message.starts_with("File not found: "));

            let err = tool.execute(&call("../../etc/passwd"), &context).await.unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }
}
