use std::fs;
use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, Class, ClassElement, Comment, Declaration,
    ExportDefaultDeclarationKind, FormalParameters, Function, PropertyKey, Statement,
    TSEnumDeclaration, TSEnumMemberName, TSGlobalDeclaration, TSInterfaceDeclaration, TSModuleDeclaration,
    TSModuleDeclarationBody, TSSignature, TSType, TSTypeAliasDeclaration, TSTypeAnnotation,
    VariableDeclaration,
};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{DocsError, Result};
use crate::jsdoc::{parse_jsdoc, ParsedJsDoc};
use crate::model::{DocEntry, EntryKind};

/// Options controlling documentation extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Include symbols marked with `@internal`.
    pub include_internal: bool,
}

/// Extracts declaration trees from TypeScript / JavaScript sources using OXC.
///
/// Namespace bodies are returned as `children` in source order without any
/// merging; same-named fragments are left for [`crate::merge`] to combine.
#[derive(Debug, Clone, Default)]
pub struct DocsExtractor {
    options: ExtractOptions,
}

impl DocsExtractor {
    /// Create a new extractor with the provided options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Extract documentation from a file on disk.
    pub fn extract_from_path(&self, path: impl AsRef<Path>) -> Result<Vec<DocEntry>> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|error| DocsError::io(path, error))?;
        self.extract_from_source(path, &source)
    }

    /// Extract documentation from an in-memory source string.
    ///
    /// The source type is inferred from `path`; unknown extensions are
    /// parsed as TypeScript.
    pub fn extract_from_source(
        &self,
        path: impl AsRef<Path>,
        source: &str,
    ) -> Result<Vec<DocEntry>> {
        let path = path.as_ref();
        let source_type = SourceType::from_path(path).unwrap_or_else(|_| SourceType::ts());

        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, source, source_type).parse();
        if !parsed.errors.is_empty() {
            let diagnostics: Vec<String> =
                parsed.errors.iter().map(|error| error.to_string()).collect();
            return Err(DocsError::parse_error(path.to_path_buf(), &diagnostics));
        }

        let program = &parsed.program;
        let context = ExtractContext {
            source,
            comments: build_comment_map(program.comments.iter()),
            options: &self.options,
        };
        let entries = context.statements(&program.body);
        debug!(path = %path.display(), entries = entries.len(), "extracted declarations");
        Ok(entries)
    }
}

/// Maps the start offset of a node to the content span of its JSDoc block.
type CommentMap = FxHashMap<u32, Span>;

struct ExtractContext<'s, 'o> {
    source: &'s str,
    comments: CommentMap,
    options: &'o ExtractOptions,
}

impl ExtractContext<'_, '_> {
    fn statements(&self, statements: &[Statement<'_>]) -> Vec<DocEntry> {
        statements
            .iter()
            .flat_map(|statement| self.statement(statement))
            .collect()
    }

    fn statement(&self, statement: &Statement<'_>) -> Vec<DocEntry> {
        let start = statement.span().start;
        let (entries, exported) = match statement {
            Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(declaration) => (self.declaration(declaration), true),
                None => return Vec::new(),
            },
            Statement::ExportDefaultDeclaration(export) => {
                let entry = match &export.declaration {
                    ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                        self.function(function)
                    }
                    ExportDefaultDeclarationKind::ClassDeclaration(class) => self.class(class),
                    _ => return Vec::new(),
                };
                (vec![entry], true)
            }
            other => match other.as_declaration() {
                Some(declaration) => (self.declaration(declaration), false),
                None => return Vec::new(),
            },
        };

        entries
            .into_iter()
            .filter_map(|mut entry| {
                entry.flags.exported |= exported;
                self.attach_doc(entry, start)
            })
            .collect()
    }

    fn declaration(&self, declaration: &Declaration<'_>) -> Vec<DocEntry> {
        match declaration {
            Declaration::VariableDeclaration(variable) => self.variables(variable),
            Declaration::FunctionDeclaration(function) => vec![self.function(function)],
            Declaration::ClassDeclaration(class) => vec![self.class(class)],
            Declaration::TSTypeAliasDeclaration(alias) => vec![self.type_alias(alias)],
            Declaration::TSInterfaceDeclaration(interface) => vec![self.interface(interface)],
            Declaration::TSEnumDeclaration(enumeration) => vec![self.enumeration(enumeration)],
            Declaration::TSModuleDeclaration(module) => vec![self.namespace(module)],
            Declaration::TSGlobalDeclaration(global) => vec![self.global(global)],
            Declaration::TSImportEqualsDeclaration(_) => Vec::new(),
        }
    }

    fn namespace(&self, module: &TSModuleDeclaration<'_>) -> DocEntry {
        let mut entry = DocEntry::new(module.id.name().to_string(), EntryKind::Namespace);
        entry.flags.ambient = module.declare;
        entry.children = Some(match &module.body {
            Some(TSModuleDeclarationBody::TSModuleBlock(block)) => self.statements(&block.body),
            // `namespace A.B {}` nests B inside A
            Some(TSModuleDeclarationBody::TSModuleDeclaration(inner)) => {
                vec![self.namespace(inner)]
            }
            None => Vec::new(),
        });
        entry
    }

    /// `declare global { ... }` documents like a namespace named `global`.
    fn global(&self, global: &TSGlobalDeclaration<'_>) -> DocEntry {
        let mut entry = DocEntry::new("global", EntryKind::Namespace);
        entry.flags.ambient = global.declare;
        entry.children = Some(self.statements(&global.body.body));
        entry
    }

    fn function(&self, function: &Function<'_>) -> DocEntry {
        let name = function
            .id
            .as_ref()
            .map(|id| id.name.to_string())
            .unwrap_or_default();
        let mut entry = DocEntry::new(name, EntryKind::Function);
        entry.flags.ambient = function.declare;
        entry.parameters = Some(self.parameters(&function.params));
        entry.type_ = Some(self.signature(&function.params, function.return_type.as_deref()));
        entry
    }

    fn class(&self, class: &Class<'_>) -> DocEntry {
        let name = class
            .id
            .as_ref()
            .map(|id| id.name.to_string())
            .unwrap_or_default();
        let mut entry = DocEntry::new(name, EntryKind::Class);
        entry.flags.ambient = class.declare;

        let members = class
            .body
            .body
            .iter()
            .filter_map(|element| match element {
                ClassElement::PropertyDefinition(property) => {
                    let mut member = DocEntry::new(property_name(&property.key), EntryKind::Property);
                    member.type_ = property
                        .type_annotation
                        .as_deref()
                        .map(|annotation| self.type_text(annotation).to_string());
                    member.flags.optional = property.optional;
                    member.flags.readonly = property.readonly;
                    self.attach_doc(member, property.span.start)
                }
                ClassElement::MethodDefinition(method) => {
                    let function = &method.value;
                    let mut member = DocEntry::new(property_name(&method.key), EntryKind::Method);
                    member.parameters = Some(self.parameters(&function.params));
                    member.type_ =
                        Some(self.signature(&function.params, function.return_type.as_deref()));
                    member.flags.optional = method.optional;
                    self.attach_doc(member, method.span.start)
                }
                _ => None,
            })
            .collect();
        entry.members = Some(members);
        entry
    }

    fn type_alias(&self, alias: &TSTypeAliasDeclaration<'_>) -> DocEntry {
        let mut entry = DocEntry::new(alias.id.name.to_string(), EntryKind::TypeAlias);
        entry.flags.ambient = alias.declare;
        entry.type_ = Some(self.slice(alias.type_annotation.span()).to_string());
        if let TSType::TSTypeLiteral(literal) = &alias.type_annotation {
            entry.members = Some(self.signatures(&literal.members));
        }
        entry
    }

    fn interface(&self, interface: &TSInterfaceDeclaration<'_>) -> DocEntry {
        let mut entry = DocEntry::new(interface.id.name.to_string(), EntryKind::Interface);
        entry.flags.ambient = interface.declare;
        entry.members = Some(self.signatures(&interface.body.body));
        entry
    }

    fn enumeration(&self, enumeration: &TSEnumDeclaration<'_>) -> DocEntry {
        let mut entry = DocEntry::new(enumeration.id.name.to_string(), EntryKind::Enum);
        entry.flags.ambient = enumeration.declare;

        let members = enumeration
            .body
            .members
            .iter()
            .filter_map(|member| {
                let name = match &member.id {
                    TSEnumMemberName::Identifier(ident) => ident.name.to_string(),
                    TSEnumMemberName::String(lit) => lit.value.to_string(),
                    _ => String::new(),
                };
                let mut entry = DocEntry::new(name, EntryKind::EnumMember);
                entry.type_ = member
                    .initializer
                    .as_ref()
                    .map(|init| self.slice(init.span()).to_string());
                self.attach_doc(entry, member.span.start)
            })
            .collect();
        entry.members = Some(members);
        entry
    }

    fn variables(&self, variable: &VariableDeclaration<'_>) -> Vec<DocEntry> {
        variable
            .declarations
            .iter()
            .map(|declarator| {
                let mut entry = DocEntry::new(binding_name(&declarator.id), EntryKind::Variable);
                entry.flags.ambient = variable.declare;
                entry.type_ = declarator
                    .id
                    .type_annotation
                    .as_deref()
                    .map(|annotation| self.type_text(annotation).to_string());
                entry
            })
            .collect()
    }

    fn signatures(&self, signatures: &[TSSignature<'_>]) -> Vec<DocEntry> {
        signatures
            .iter()
            .filter_map(|signature| match signature {
                TSSignature::TSPropertySignature(property) => {
                    let mut entry = DocEntry::new(property_name(&property.key), EntryKind::Property);
                    entry.type_ = property
                        .type_annotation
                        .as_deref()
                        .map(|annotation| self.type_text(annotation).to_string());
                    entry.flags.optional = property.optional;
                    entry.flags.readonly = property.readonly;
                    self.attach_doc(entry, property.span.start)
                }
                TSSignature::TSMethodSignature(method) => {
                    let mut entry = DocEntry::new(property_name(&method.key), EntryKind::Method);
                    entry.parameters = Some(self.parameters(&method.params));
                    entry.type_ =
                        Some(self.signature(&method.params, method.return_type.as_deref()));
                    entry.flags.optional = method.optional;
                    self.attach_doc(entry, method.span.start)
                }
                _ => None,
            })
            .collect()
    }

    fn parameters(&self, params: &FormalParameters<'_>) -> Vec<DocEntry> {
        let mut entries: Vec<DocEntry> = params
            .items
            .iter()
            .map(|param| {
                let mut entry = DocEntry::new(binding_name(&param.pattern), EntryKind::Parameter);
                entry.type_ = param
                    .pattern
                    .type_annotation
                    .as_deref()
                    .map(|annotation| self.type_text(annotation).to_string());
                entry.flags.optional = param.pattern.optional;
                entry
            })
            .collect();

        if let Some(rest) = &params.rest {
            let text = self.slice(rest.span);
            let name = format!("...{}", binding_name(&rest.argument));
            let mut entry = DocEntry::new(name, EntryKind::Parameter);
            entry.type_ = text
                .split_once(':')
                .map(|(_, ty)| ty.trim().to_string())
                .filter(|ty| !ty.is_empty());
            entries.push(entry);
        }
        entries
    }

    /// Renders `(a: A, b?: B) => R` from the declaration's source text.
    fn signature(&self, params: &FormalParameters<'_>, returns: Option<&TSTypeAnnotation<'_>>) -> String {
        let mut parts: Vec<&str> = params.items.iter().map(|param| self.slice(param.span)).collect();
        if let Some(rest) = &params.rest {
            parts.push(self.slice(rest.span));
        }
        let returns = returns.map_or("any", |annotation| self.type_text(annotation));
        format!("({}) => {}", parts.join(", "), returns)
    }

    fn attach_doc(&self, mut entry: DocEntry, node_start: u32) -> Option<DocEntry> {
        let Some(parsed) = self.doc_comment(node_start) else {
            return Some(entry);
        };
        if parsed.is_internal && !self.options.include_internal {
            return None;
        }
        apply_parsed_doc(&mut entry, parsed);
        Some(entry)
    }

    fn doc_comment(&self, node_start: u32) -> Option<ParsedJsDoc> {
        self.comments
            .get(&node_start)
            .map(|span| parse_jsdoc(slice_source(self.source, *span)))
    }

    fn type_text(&self, annotation: &TSTypeAnnotation<'_>) -> &str {
        self.slice(annotation.type_annotation.span())
    }

    fn slice(&self, span: Span) -> &str {
        slice_source(self.source, span)
    }
}

fn build_comment_map<'a, I>(comments: I) -> CommentMap
where
    I: IntoIterator<Item = &'a Comment>,
{
    let mut map = CommentMap::default();
    for comment in comments {
        if comment.is_jsdoc() {
            map.insert(comment.attached_to, comment.content_span());
        }
    }
    map
}

fn apply_parsed_doc(entry: &mut DocEntry, parsed: ParsedJsDoc) {
    if parsed.description.is_some() {
        entry.documentation = parsed.description;
    }
    if !parsed.tags.is_empty() {
        entry.js_tags = Some(parsed.tags);
    }
}

fn binding_name(pattern: &BindingPattern<'_>) -> String {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => ident.name.to_string(),
        _ => String::new(),
    }
}

fn property_name(key: &PropertyKey<'_>) -> String {
    key.static_name()
        .map(|name| name.to_string())
        .unwrap_or_default()
}

fn slice_source(source: &str, span: Span) -> &str {
    let start = span.start as usize;
    let end = span.end as usize;
    &source[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str) -> Vec<DocEntry> {
        DocsExtractor::default()
            .extract_from_source("api/device.d.ts", source)
            .expect("extraction should succeed")
    }

    #[test]
    fn namespace_body_becomes_children() {
        let entries = extract(
            r#"
            declare namespace Taro {
              namespace vibrate {
                type Param = {}
              }
              function vibrate(OBJECT?: vibrate.Param): Promise<any>
            }
            "#,
        );

        assert_eq!(entries.len(), 1);
        let root = &entries[0];
        assert_eq!(root.name, "Taro");
        assert_eq!(root.kind, EntryKind::Namespace);
        assert!(root.flags.ambient);
        assert!(root.exports.is_none());

        let children = root.children.as_deref().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind, EntryKind::Namespace);
        assert_eq!(children[1].kind, EntryKind::Function);
        assert_eq!(
            children[1].type_.as_deref(),
            Some("(OBJECT?: vibrate.Param) => Promise<any>")
        );
    }

    #[test]
    fn dotted_namespace_nests() {
        let entries = extract("declare namespace A.B { function f(): void }");
        let outer = &entries[0];
        assert_eq!(outer.name, "A");
        let inner = &outer.children.as_deref().unwrap()[0];
        assert_eq!(inner.name, "B");
        assert_eq!(inner.children.as_deref().unwrap()[0].name, "f");
    }

    #[test]
    fn global_augmentation_becomes_namespace() {
        let entries = extract(
            r#"
            export {}
            declare global {
              /** 小程序全局对象 */
              interface Window { taro: number }
              function getApp(): any
            }
            "#,
        );

        let global = entries.iter().find(|entry| entry.name == "global").unwrap();
        assert_eq!(global.kind, EntryKind::Namespace);
        assert!(global.flags.ambient);
        let children = global.children.as_deref().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name, "Window");
        assert_eq!(children[0].kind, EntryKind::Interface);
        assert_eq!(children[0].documentation.as_deref(), Some("小程序全局对象"));
        assert_eq!(children[1].kind, EntryKind::Function);
    }

    #[test]
    fn function_parameters_carry_types_and_optionality() {
        let entries = extract("declare function request(url: string, options?: Options, ...rest: any[]): void");
        let params = entries[0].parameter_list();
        assert_eq!(params.len(), 3);
        assert_eq!(params[0].name, "url");
        assert_eq!(params[0].type_.as_deref(), Some("string"));
        assert!(!params[0].flags.optional);
        assert!(params[1].flags.optional);
        assert_eq!(params[2].name, "...rest");
    }

    #[test]
    fn function_without_return_type_returns_any() {
        let entries = extract("declare function noop()");
        assert_eq!(entries[0].type_.as_deref(), Some("() => any"));
    }

    #[test]
    fn enum_members_and_unnamed_declarations() {
        let entries = extract("declare enum interval { 'game', ui = 2 }");
        let members = entries[0].members.as_deref().unwrap();
        assert_eq!(members[0].name, "game");
        assert!(members[0].type_.is_none());
        assert_eq!(members[1].name, "ui");
        assert_eq!(members[1].type_.as_deref(), Some("2"));
    }

    #[test]
    fn interface_and_class_members() {
        let entries = extract(
            r#"
            interface Options { readonly url: string; abort(reason?: string): void }
            declare class Task { id: number; cancel(): boolean }
            "#,
        );
        let interface = entries[0].members.as_deref().unwrap();
        assert!(interface[0].flags.readonly);
        assert_eq!(interface[1].kind, EntryKind::Method);
        assert_eq!(interface[1].type_.as_deref(), Some("(reason?: string) => void"));

        let class = entries[1].members.as_deref().unwrap();
        assert_eq!(class[0].name, "id");
        assert_eq!(class[1].type_.as_deref(), Some("() => boolean"));
    }

    #[test]
    fn parse_errors_name_the_file() {
        let err = DocsExtractor::default()
            .extract_from_source("api/broken.d.ts", "declare namespace {")
            .unwrap_err();
        assert!(matches!(err, DocsError::Parse { .. }));
        assert!(err.to_string().contains("api/broken.d.ts"));
    }
}
