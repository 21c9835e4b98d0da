use crate::model::{DocEntry, JsTag};
use crate::platform::Platform;

/// Tags that get dedicated table columns or sections instead of being listed.
const TABLE_HIDDEN_TAGS: [&str; 2] = ["default", "supported"];

/// One Markdown page, named after the export it documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDoc {
    /// Export name; the page is written to `<name>.md`.
    pub name: String,
    /// Page content.
    pub content: String,
}

/// Render one page per export of a merged root entry.
///
/// The root's name is used as the namespace prefix in titles and support
/// tables (`Taro.request(...)`).
pub fn render_markdown(root: &DocEntry, platforms: &[Platform]) -> Vec<RenderedDoc> {
    root.export_list()
        .iter()
        .map(|export| RenderedDoc {
            name: export.name.clone(),
            content: render_export(&root.name, export, platforms),
        })
        .collect()
}

/// Render the page for a single export.
pub fn render_export(namespace: &str, export: &DocEntry, platforms: &[Platform]) -> String {
    let name = export.name.as_str();
    let params = export
        .parameter_list()
        .iter()
        .map(|param| param.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut md: Vec<String> = vec![
        "---".to_string(),
        format!("title: {namespace}.{name}({params})"),
        format!("sidebar_label: {name}"),
        "---".to_string(),
        String::new(),
    ];

    if let Some(documentation) = &export.documentation {
        md.push(documentation.clone());
        md.push(String::new());
    }

    if let Some(type_) = &export.type_ {
        md.push("## 类型".to_string());
        md.push("```typescript".to_string());
        md.push(type_.clone());
        md.push("```".to_string());
        md.push(String::new());
    }

    let tables: Vec<Vec<String>> = export
        .export_list()
        .iter()
        .filter_map(parameter_table)
        .collect();
    if !tables.is_empty() {
        md.push("## 参数".to_string());
        md.extend(tables.into_iter().flatten());
    }

    if let Some(example) = export.tag("example") {
        md.push("## 示例代码".to_string());
        md.push(String::new());
        md.push(example.text().to_string());
        md.push(String::new());
    }

    // a bare `@supported` lists no platforms, so there is no table to draw
    if let Some(supported) = export.tag("supported").and_then(|tag| tag.text.as_deref()) {
        md.push("## API 支持度".to_string());
        md.extend(support_matrix(namespace, name, supported, platforms));
        md.push(String::new());
    }

    if let Some(see) = export.tag("see") {
        md.push(String::new());
        md.push(format!("> [参考文档]({})", see.text()));
        md.push(String::new());
    }

    md.join("\n")
}

/// Builds the table for an exported type, or `None` when it has no rows.
///
/// Rows come from `members`, falling back to `exports`. Type, Default and
/// Description columns only appear when at least one row fills them.
fn parameter_table(param: &DocEntry) -> Option<Vec<String>> {
    let rows = param
        .members
        .as_deref()
        .or(param.exports.as_deref())
        .unwrap_or_default();
    if rows.is_empty() {
        return None;
    }

    let has_type = rows
        .iter()
        .any(|row| row.type_.as_deref().is_some_and(|ty| ty != param.name));
    let has_default = rows.iter().any(|row| row.tag("default").is_some());
    let has_description = rows.iter().any(|row| row.documentation.is_some());

    let mut header = String::from("| Name |");
    let mut align = String::from("| --- |");
    if has_type {
        header.push_str(" Type |");
        align.push_str(" --- |");
    }
    if has_default {
        header.push_str(" Default |");
        align.push_str(" :---: |");
    }
    if has_description {
        header.push_str(" Description |");
        align.push_str(" --- |");
    }

    let mut lines = vec![param.name.clone(), header, align];
    for row in rows {
        let mut line = format!("| {} |", cell(&row.name));
        if has_type {
            let ty = row.type_.as_deref().map(code).unwrap_or_default();
            line.push_str(&format!(" {ty} |"));
        }
        if has_default {
            let default = row
                .tag("default")
                .map(JsTag::text)
                .filter(|text| !text.is_empty())
                .map(code)
                .unwrap_or_default();
            line.push_str(&format!(" {default} |"));
        }
        if has_description {
            line.push_str(&format!(" {} |", description(row)));
        }
        lines.push(line);
    }
    lines.push(String::new());
    Some(lines)
}

/// Documentation followed by the remaining tags as `name: text` lines.
fn description(row: &DocEntry) -> String {
    let mut text = row.documentation.as_deref().map(cell).unwrap_or_default();
    let extra: Vec<String> = row
        .tags()
        .iter()
        .filter(|tag| !TABLE_HIDDEN_TAGS.contains(&tag.name.as_str()))
        .map(|tag| format!("{}: {}", tag.name, cell(tag.text())))
        .collect();
    if !extra.is_empty() {
        text.push_str("<br />");
        text.push_str(&extra.join("<br />"));
    }
    text
}

/// Single-row table with a check mark per listed platform, in platform order.
fn support_matrix(namespace: &str, name: &str, supported: &str, platforms: &[Platform]) -> Vec<String> {
    let listed: Vec<String> = supported
        .split(',')
        .map(|id| id.trim().to_lowercase())
        .collect();

    let mut titles = String::from("| API |");
    let mut splits = String::from("| :---: |");
    let mut row = format!("| {namespace}.{name} |");
    for platform in platforms {
        if listed.contains(&platform.name.to_lowercase()) {
            titles.push_str(&format!(" {} |", platform.label));
            splits.push_str(" :---: |");
            row.push_str(" ✔️ |");
        }
    }
    vec![titles, splits, row]
}

fn code(text: &str) -> String {
    format!("`{}`", cell(text))
}

/// Keeps cell text on one table row.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br />")
}
