pub mod comments;
pub mod extractor;
pub mod filter;
pub mod import_resolver;
pub mod progress;
pub mod walker;

pub use comments::strip_comments;
pub use extractor::{count_lines, Extraction, StructuralExtractor};
pub use filter::{IgnoreRules, PathFilter};
pub use import_resolver::{
    parse_go_module, CSharpImportResolver, GoImportResolver, ImportResolver,
    ImportResolverRegistry, JvmImportResolver, NativeImportResolver, PhpImportResolver,
    ProjectFiles, PythonImportResolver, RubyImportResolver, RustImportResolver,
    ScriptImportResolver, SwiftImportResolver,
};
pub use progress::{ProgressSnapshot, ScanProgress};
pub use walker::{relative_key, FileWalker, WalkOutcome};
