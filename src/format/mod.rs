//! Output formatting for benefits (table, JSON, markdown, CSV).

use crate::catalog::Benefit;
use crate::config::OutputFormat;
use crate::engine::QueryResult;

/// Formats benefits for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single benefit.
    pub fn format_benefit(&self, benefit: &Benefit) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(benefit),
            OutputFormat::Table => self.table_single(benefit),
            OutputFormat::Markdown => self.markdown_single(benefit),
            OutputFormat::Csv => self.csv_benefits(std::slice::from_ref(benefit)),
        }
    }

    /// Formats an accumulated result set. `total` is the criteria-wide match
    /// count, which can exceed the rows shown.
    pub fn format_results(&self, benefits: &[Benefit], total: usize) -> String {
        if benefits.is_empty() {
            return match self.format {
                OutputFormat::Json => self.json_results(benefits, total),
                OutputFormat::Csv => self.csv_header(),
                _ => "No benefits found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_results(benefits, total),
            OutputFormat::Table => self.table_benefits(benefits, total),
            OutputFormat::Markdown => self.markdown_benefits(benefits, total),
            OutputFormat::Csv => self.csv_benefits(benefits),
        }
    }

    /// Formats one engine page in the wire envelope shape.
    pub fn format_page(&self, page: &QueryResult) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                "data": page.data,
                "total": page.total,
                "page": page.page,
                "limit": page.limit,
                "success": true,
            }))
            .unwrap_or_else(|_| "{}".to_string()),
            _ => self.format_results(&page.data, page.total),
        }
    }

    /// Formats the category vocabulary.
    pub fn format_categories(&self, categories: &[String]) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(categories).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Markdown => {
                categories.iter().map(|c| format!("- {}", c)).collect::<Vec<_>>().join("\n")
            }
            OutputFormat::Csv => {
                let mut lines = vec!["category".to_string()];
                lines.extend(categories.iter().map(|c| Self::csv_escape(c)));
                lines.join("\n")
            }
            OutputFormat::Table => categories.join("\n"),
        }
    }

    // JSON formatting

    fn json_single(&self, benefit: &Benefit) -> String {
        serde_json::to_string_pretty(benefit).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_results(&self, benefits: &[Benefit], total: usize) -> String {
        serde_json::to_string_pretty(&serde_json::json!({
            "data": benefits,
            "total": total,
            "success": true,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    // Table formatting

    fn table_single(&self, benefit: &Benefit) -> String {
        let mut lines = Vec::new();

        lines.push(format!("ID:        {}", benefit.id));
        lines.push(format!("Title:     {}", benefit.title));
        lines.push(format!("Category:  {}", benefit.category));
        lines.push(format!("Discount:  {}", benefit.discount));
        lines.push(format!("Days:      {}", benefit.valid_days.join(", ")));
        lines.push(format!("Expires:   {}", benefit.expires_at.format("%Y-%m-%d")));
        lines.push(format!("Details:   {}", benefit.description));

        lines.join("\n")
    }

    fn table_benefits(&self, benefits: &[Benefit], total: usize) -> String {
        let id_width = 5;
        let category_width = 16;
        let discount_width = 12;
        let expires_width = 10;
        let title_width = 44;

        let mut lines = Vec::new();

        // Header
        lines.push(format!(
            "{:<id_width$}  {:<category_width$}  {:<discount_width$}  {:<expires_width$}  {}",
            "ID", "Category", "Discount", "Expires", "Title"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<category_width$}  {:-<discount_width$}  {:-<expires_width$}  {:-<title_width$}",
            "", "", "", "", ""
        ));

        // Rows
        for benefit in benefits {
            lines.push(format!(
                "{:<id_width$}  {:<category_width$}  {:<discount_width$}  {:<expires_width$}  {}",
                benefit.id,
                truncate(&benefit.category, category_width),
                truncate(&benefit.discount, discount_width),
                benefit.expires_at.format("%Y-%m-%d"),
                truncate(&benefit.title, title_width),
            ));
        }

        lines.push(String::new());
        lines.push(format!("Showing {} of {} benefits", benefits.len(), total));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, benefit: &Benefit) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", benefit.title));
        lines.push(String::new());
        lines.push(format!("- **ID:** {}", benefit.id));
        lines.push(format!("- **Category:** {}", benefit.category));
        lines.push(format!("- **Discount:** {}", benefit.discount));
        lines.push(format!("- **Valid days:** {}", benefit.valid_days.join(", ")));
        lines.push(format!("- **Expires:** {}", benefit.expires_at.format("%Y-%m-%d")));
        lines.push(String::new());
        lines.push(benefit.description.clone());

        lines.join("\n")
    }

    fn markdown_benefits(&self, benefits: &[Benefit], total: usize) -> String {
        let mut lines = Vec::new();

        lines.push("| ID | Category | Discount | Expires | Title |".to_string());
        lines.push("|----|----------|----------|---------|-------|".to_string());

        for benefit in benefits {
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                benefit.id,
                benefit.category,
                benefit.discount,
                benefit.expires_at.format("%Y-%m-%d"),
                truncate(&benefit.title, 40),
            ));
        }

        lines.push(String::new());
        lines.push(format!("*Showing {} of {} benefits*", benefits.len(), total));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "id,title,discount,category,valid_days,expires_at".to_string()
    }

    fn csv_benefits(&self, benefits: &[Benefit]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for benefit in benefits {
            lines.push(format!(
                "{},{},{},{},{},{}",
                Self::csv_escape(&benefit.id),
                Self::csv_escape(&benefit.title),
                Self::csv_escape(&benefit.discount),
                Self::csv_escape(&benefit.category),
                Self::csv_escape(&benefit.valid_days.join(";")),
                benefit.expires_at.to_rfc3339(),
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Truncates on a character boundary; titles carry accented characters, so
/// byte slicing is not safe here.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
