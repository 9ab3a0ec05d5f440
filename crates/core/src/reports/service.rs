//! The five report shapes.
//!
//! Each shape is a column schema, the lines around the table and a row to
//! cells mapping, all fed to the one [`ReportRenderer`].

use rust_decimal::Decimal;
use tracing::info;

#[cfg(test)]
use super::canvas::Canvas;
use super::error::RenderError;
use super::format::{
    date_cell, display_date, member_status_label, note_cell, officiant_cell, optional_date,
    or_not_available, short_type_label, status_label, text_cell, type_label,
};
use super::renderer::{
    RenderedReport, ReportBranding, ReportDocument, ReportRenderer, ReportSchema, SummaryBlock,
};
use crate::contribution::{
    ContributionFilter, ContributionRecord, ContributionStatus, ContributionType, MemberRecord,
};
use crate::stats::{AggregateSummary, Aggregator};

const SECRETARY: &str = "Signature Secrétaire";
const TREASURER: &str = "Signature Trésorier";

/// Maps one row to its cells, given the branding for amounts.
pub type CellMapper<R> = fn(&ReportBranding, &R) -> Vec<String>;

/// A report ready to lay out: document, schema, rows and cell mapping.
pub struct ReportShape<'a, R> {
    /// Lines around the table.
    pub document: ReportDocument,
    /// Table columns.
    pub schema: ReportSchema,
    rows: &'a [R],
    cells: CellMapper<R>,
}

impl<R> ReportShape<'_, R> {
    /// Number of table rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells of row `index`, if any.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn cells(&self, renderer: &ReportRenderer, index: usize) -> Option<Vec<String>> {
        self.rows
            .get(index)
            .map(|row| (self.cells)(renderer.branding(), row))
    }

    /// Lays out the report without encoding it.
    ///
    /// # Errors
    ///
    /// Returns a schema error.
    #[cfg(test)]
    pub(crate) fn layout(&self, renderer: &ReportRenderer) -> Result<Canvas, RenderError> {
        let branding = renderer.branding();
        renderer.layout(&self.document, &self.schema, self.rows, |row| {
            (self.cells)(branding, row)
        })
    }

    /// Lays out and encodes the report.
    ///
    /// # Errors
    ///
    /// Returns a schema or encoding error.
    pub fn render(&self, renderer: &ReportRenderer) -> Result<RenderedReport, RenderError> {
        let branding = renderer.branding();
        renderer.render(&self.document, &self.schema, self.rows, |row| {
            (self.cells)(branding, row)
        })
    }
}

/// Builds and renders the five report shapes.
#[derive(Debug, Clone, Default)]
pub struct ReportService {
    renderer: ReportRenderer,
}

impl ReportService {
    /// Creates a service around a renderer.
    #[must_use]
    pub const fn new(renderer: ReportRenderer) -> Self {
        Self { renderer }
    }

    /// The renderer in use.
    #[must_use]
    pub const fn renderer(&self) -> &ReportRenderer {
        &self.renderer
    }

    fn amount(&self, amount: Decimal) -> String {
        self.renderer.branding().amount(amount)
    }

    fn finish<R>(
        &self,
        kind: &str,
        shape: &ReportShape<'_, R>,
    ) -> Result<RenderedReport, RenderError> {
        let report = shape.render(&self.renderer)?;
        info!(
            report = kind,
            rows = shape.row_count(),
            pages = report.page_count,
            bytes = report.bytes.len(),
            "generated report"
        );
        Ok(report)
    }

    /// Monthly summary over a period.
    #[must_use]
    pub fn monthly_shape<'a>(
        &self,
        period_label: &str,
        records: &'a [ContributionRecord],
        summary: &AggregateSummary,
    ) -> ReportShape<'a, ContributionRecord> {
        let block = SummaryBlock::new()
            .with_heading("Résumé")
            .line("Total des cotisations", summary.total_count.to_string())
            .line("Total payé", self.amount(summary.total_paid_amount))
            .line("Total non payé", self.amount(summary.total_unpaid_amount))
            .line("Total partiel", self.amount(summary.total_partial_amount));

        ReportShape {
            document: ReportDocument::new("Rapport Mensuel des Cotisations")
                .with_period(period_label)
                .with_summary(block)
                .with_table_heading("Détail des Cotisations")
                .with_signature(SECRETARY)
                .with_signature(TREASURER),
            schema: ReportSchema::new(
                vec![70, 120, 80, 80, 80, 100],
                ["Date", "Membre", "Type", "Montant", "Statut", "Célébrant"],
            ),
            rows: records,
            cells: |branding, record| {
                vec![
                    display_date(record.date),
                    record.member_name.clone().unwrap_or_default(),
                    type_label(record.contribution_type).to_string(),
                    branding.amount(record.amount),
                    status_label(record.status).to_string(),
                    officiant_cell(record),
                ]
            },
        }
    }

    /// Renders the monthly summary.
    ///
    /// # Errors
    ///
    /// Returns a render error; no document is produced.
    pub fn generate_monthly_report(
        &self,
        period_label: &str,
        records: &[ContributionRecord],
        summary: &AggregateSummary,
    ) -> Result<RenderedReport, RenderError> {
        self.finish("monthly", &self.monthly_shape(period_label, records, summary))
    }

    /// One member's contribution history.
    #[must_use]
    pub fn member_shape<'a>(
        &self,
        member: &MemberRecord,
        records: &'a [ContributionRecord],
    ) -> ReportShape<'a, ContributionRecord> {
        let block = SummaryBlock::new()
            .with_heading("Informations du Membre")
            .line("Nom", member.full_name.clone())
            .line("Téléphone", or_not_available(member.phone.as_deref()))
            .line("Fonction", or_not_available(member.role.as_deref()))
            .line("Date d'adhésion", optional_date(member.membership_date));

        let totals = Aggregator::compute_summary(records, &ContributionFilter::new());

        ReportShape {
            document: ReportDocument::new("Rapport Individuel de Cotisations")
                .with_summary(block)
                .with_table_heading("Historique des Cotisations")
                .with_closing_line(format!(
                    "Total payé: {}",
                    self.amount(totals.amount_for(ContributionStatus::Paid))
                ))
                .with_closing_line(format!(
                    "Total non payé: {}",
                    self.amount(totals.amount_for(ContributionStatus::Unpaid))
                )),
            schema: ReportSchema::new(
                vec![80, 120, 100, 100, 100],
                ["Date", "Type", "Montant", "Statut", "Célébrant"],
            ),
            rows: records,
            cells: |branding, record| {
                vec![
                    display_date(record.date),
                    type_label(record.contribution_type).to_string(),
                    branding.amount(record.amount),
                    status_label(record.status).to_string(),
                    officiant_cell(record),
                ]
            },
        }
    }

    /// Renders one member's history.
    ///
    /// # Errors
    ///
    /// Returns a render error; no document is produced.
    pub fn generate_member_report(
        &self,
        member: &MemberRecord,
        records: &[ContributionRecord],
    ) -> Result<RenderedReport, RenderError> {
        self.finish("member", &self.member_shape(member, records))
    }

    /// Every contribution of one type.
    #[must_use]
    pub fn event_shape<'a>(
        &self,
        contribution_type: ContributionType,
        records: &'a [ContributionRecord],
    ) -> ReportShape<'a, ContributionRecord> {
        let totals = Aggregator::compute_summary(records, &ContributionFilter::new());
        let block = SummaryBlock::new()
            .line("Total", self.amount(totals.total_amount()))
            .line("Total payé", self.amount(totals.total_paid_amount));

        ReportShape {
            document: ReportDocument::new(format!("Rapport: {}", type_label(contribution_type)))
                .with_summary(block)
                .with_table_heading("Liste des Cotisations"),
            schema: ReportSchema::new(
                vec![80, 200, 100, 100],
                ["Date", "Membre", "Montant", "Statut"],
            ),
            rows: records,
            cells: |branding, record| {
                vec![
                    display_date(record.date),
                    record.member_name.clone().unwrap_or_default(),
                    branding.amount(record.amount),
                    status_label(record.status).to_string(),
                ]
            },
        }
    }

    /// Renders the per-type list.
    ///
    /// # Errors
    ///
    /// Returns a render error; no document is produced.
    pub fn generate_event_report(
        &self,
        contribution_type: ContributionType,
        records: &[ContributionRecord],
    ) -> Result<RenderedReport, RenderError> {
        self.finish("event", &self.event_shape(contribution_type, records))
    }

    /// The member roster, in the order given.
    #[must_use]
    pub fn members_shape<'a>(&self, members: &'a [MemberRecord]) -> ReportShape<'a, MemberRecord> {
        let counts = Aggregator::member_counts(members);
        let block = SummaryBlock::new()
            .line("Total des membres", counts.total.to_string())
            .line("Membres actifs", counts.active.to_string())
            .line("Membres inactifs", counts.inactive.to_string());

        ReportShape {
            document: ReportDocument::new("Liste des Membres")
                .with_summary(block)
                .with_table_heading("Détail des Membres")
                .with_signature(SECRETARY),
            schema: ReportSchema::new(
                vec![150, 100, 100, 100, 80],
                ["Nom complet", "Téléphone", "Fonction", "Date adhésion", "Statut"],
            ),
            rows: members,
            cells: |_, member| {
                vec![
                    member.full_name.clone(),
                    text_cell(member.phone.as_deref()),
                    text_cell(member.role.as_deref()),
                    date_cell(member.membership_date),
                    member_status_label(member.status).to_string(),
                ]
            },
        }
    }

    /// Renders the member roster.
    ///
    /// # Errors
    ///
    /// Returns a render error; no document is produced.
    pub fn generate_members_report(
        &self,
        members: &[MemberRecord],
    ) -> Result<RenderedReport, RenderError> {
        self.finish("members", &self.members_shape(members))
    }

    /// The full contribution list.
    #[must_use]
    pub fn contributions_shape<'a>(
        &self,
        records: &'a [ContributionRecord],
    ) -> ReportShape<'a, ContributionRecord> {
        let totals = Aggregator::compute_summary(records, &ContributionFilter::new());
        let mut block = SummaryBlock::new()
            .line("Total des cotisations", totals.total_count.to_string())
            .line("Total", self.amount(totals.total_amount()))
            .line("Total payé", self.amount(totals.total_paid_amount))
            .line("Total non payé", self.amount(totals.total_unpaid_amount));
        if totals.total_partial_amount > Decimal::ZERO {
            block = block.line("Total partiel", self.amount(totals.total_partial_amount));
        }

        ReportShape {
            document: ReportDocument::new("Liste des Cotisations")
                .with_summary(block)
                .with_table_heading("Détail des Cotisations")
                .with_signature(SECRETARY)
                .with_signature(TREASURER),
            schema: ReportSchema::new(
                vec![55, 100, 60, 70, 60, 80, 100],
                ["Date", "Membre", "Type", "Montant", "Statut", "Célébrant", "Observation"],
            )
            .with_font_sizes(9, 8),
            rows: records,
            cells: |branding, record| {
                vec![
                    display_date(record.date),
                    record.member_name.clone().unwrap_or_default(),
                    short_type_label(record.contribution_type).to_string(),
                    branding.amount(record.amount),
                    status_label(record.status).to_string(),
                    officiant_cell(record),
                    note_cell(record),
                ]
            },
        }
    }

    /// Renders the full contribution list.
    ///
    /// # Errors
    ///
    /// Returns a render error; no document is produced.
    pub fn generate_contributions_report(
        &self,
        records: &[ContributionRecord],
    ) -> Result<RenderedReport, RenderError> {
        self.finish("contributions", &self.contributions_shape(records))
    }
}
