use super::{CommentSyntax, LanguageTag, Nesting, RuleSpec};

pub const RUBY: RuleSpec = RuleSpec {
    language: LanguageTag::Ruby,
    extensions: &["rb", "rake", "gemspec"],
    classes: &[r"^\s*(?:class|module)\s+(?:[A-Z]\w*::)*([A-Z]\w*)"],
    functions: &[r"^\s*def\s+(?:self\.)?([A-Za-z_]\w*[?!=]?)"],
    imports: &[
        r#"^\s*require_relative\s*\(?\s*['"]([^'"]+)['"]"#,
        r#"^\s*require\s*\(?\s*['"]([^'"]+)['"]"#,
        r#"^\s*load\s*\(?\s*['"]([^'"]+)['"]"#,
    ],
    import_block: None,
    reserved: &[],
    nesting: Nesting::Indentation,
    member_scopes: &[],
    methods: &[],
    comments: CommentSyntax {
        line: &["#"],
        block: &[("=begin", "=end")],
        strings: &['"', '\''],
        multiline_strings: &[],
    },
};

#[cfg(test)]
mod tests {
    use crate::indexer::extractor::StructuralExtractor;
    use crate::indexer::Extraction;
    use crate::languages::{LanguageRegistry, LanguageTag};

    fn extract(source: &str) -> Extraction {
        let registry = LanguageRegistry::new().unwrap();
        StructuralExtractor::new(&registry).extract(source, LanguageTag::Ruby)
    }

    #[test]
    fn test_ruby_declarations() {
        let source = r#"
require 'json'
require_relative "lib/helpers"

=begin
class Hidden
end
=end

module Billing
  class Api::InvoicesController < ApplicationController
    class << self
      def build
      end
    end

    def index
    end

    def paid?
    end
  end
end
"#;
        let result = extract(source);
        assert_eq!(result.classes, vec!["Billing", "InvoicesController"]);
        assert_eq!(result.functions, vec!["build", "index", "paid?"]);
        assert_eq!(result.imports, vec!["json", "lib/helpers"]);
    }
}
