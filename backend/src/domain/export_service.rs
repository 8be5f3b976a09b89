//! Export of the current travel as CSV documents and JSON backups.
//!
//! This is presentation plumbing around the settlement engine: everything is
//! rendered from DTO snapshots, and file writing is confined to
//! [`ExportService::export_all_to_path`].

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;

use shared::{ExportDocument, ExportToPathRequest, ExportToPathResponse};

use crate::domain::error::DomainError;
use crate::domain::mappers;
use crate::domain::models::Travel;
use crate::domain::settlement_service::SettlementService;
use crate::domain::travel_service::TravelService;
use crate::storage::LedgerStore;

#[derive(Clone)]
pub struct ExportService {
    store: Arc<LedgerStore>,
}

impl ExportService {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// Settlement summary: travel header, per-participant settlement table,
    /// and the suggested transfer list.
    pub fn export_summary_csv(
        &self,
        settlement_service: &SettlementService,
    ) -> Result<ExportDocument> {
        let travel = self.current_travel()?;

        let mut content = String::new();
        content.push_str("Travel Expense Summary\n");
        content.push_str(&format!("Travel Name:,{}\n", csv_field(&travel.name)));
        content.push_str(&format!(
            "Travel Period:,{} - {}\n",
            travel.start_date, travel.end_date
        ));
        content.push_str(&format!(
            "Total Expenses:,{:.2}\n",
            settlement_service.total_expenses()
        ));
        content.push_str(&format!(
            "Travel Fund Balance:,{:.2}\n",
            settlement_service.travel_fund_balance()
        ));
        content.push('\n');

        content.push_str(
            "Participant,Advance Paid,Personally Paid,Expense Share,Due Amount,Refund Amount,Donated\n",
        );
        for settlement in settlement_service
            .calculate_settlements()
            .iter()
            .map(mappers::settlement_to_dto)
        {
            content.push_str(&format!(
                "{},{:.2},{:.2},{:.2},{:.2},{:.2},{}\n",
                csv_field(&settlement.name),
                settlement.advance_paid,
                settlement.personally_paid,
                settlement.expense_share,
                settlement.due_amount,
                settlement.refund_amount,
                if settlement.donated { "Yes" } else { "No" },
            ));
        }

        let transfers = settlement_service.settlement_transfers();
        if !transfers.is_empty() {
            content.push('\n');
            content.push_str("Suggested Transfers\n");
            content.push_str("From,To,Amount\n");
            for transfer in transfers.iter().map(mappers::transfer_to_dto) {
                content.push_str(&format!(
                    "{},{},{:.2}\n",
                    csv_field(participant_name(&travel, &transfer.from)),
                    csv_field(participant_name(&travel, &transfer.to)),
                    transfer.amount,
                ));
            }
        }

        info!("EXPORT: built settlement summary for '{}'", travel.name);
        Ok(ExportDocument {
            filename: format!("{}-summary.csv", slugify(&travel.name)),
            content,
        })
    }

    pub fn export_expenses_csv(&self) -> Result<ExportDocument> {
        let travel = self.current_travel()?;
        let dto = mappers::travel_to_dto(&travel);

        let mut content = String::new();
        content.push_str("Date,Type,Amount,Paid By,Paid From Fund,Comment\n");
        for expense in &dto.expenses {
            let paid_by = expense
                .paid_by
                .iter()
                .map(|payer| {
                    format!(
                        "{}: {:.2}",
                        participant_name(&travel, &payer.participant_id),
                        payer.amount
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");

            content.push_str(&format!(
                "{},{},{:.2},{},{},{}\n",
                expense.date,
                csv_field(&expense.type_label()),
                expense.amount,
                csv_field(&paid_by),
                if expense.paid_from_fund { "Yes" } else { "No" },
                csv_field(expense.comment.as_deref().unwrap_or("")),
            ));
        }

        Ok(ExportDocument {
            filename: format!("{}-expenses.csv", slugify(&travel.name)),
            content,
        })
    }

    pub fn export_contributions_csv(&self) -> Result<ExportDocument> {
        let travel = self.current_travel()?;
        let dto = mappers::travel_to_dto(&travel);

        let mut content = String::new();
        content.push_str("Date,Participant,Amount,Comment\n");
        for contribution in &dto.advance_contributions {
            content.push_str(&format!(
                "{},{},{:.2},{}\n",
                contribution.date,
                csv_field(participant_name(&travel, &contribution.participant_id)),
                contribution.amount,
                csv_field(contribution.comment.as_deref().unwrap_or("")),
            ));
        }

        Ok(ExportDocument {
            filename: format!("{}-contributions.csv", slugify(&travel.name)),
            content,
        })
    }

    pub fn export_participants_csv(&self) -> Result<ExportDocument> {
        let travel = self.current_travel()?;
        let dto = mappers::travel_to_dto(&travel);

        let mut content = String::new();
        content.push_str("Name,Email,Participation Periods\n");
        for participant in &dto.participants {
            let periods = participant
                .participation_periods
                .iter()
                .map(|period| format!("{} - {}", period.start_date, period.end_date))
                .collect::<Vec<_>>()
                .join(", ");

            content.push_str(&format!(
                "{},{},{}\n",
                csv_field(&participant.name),
                csv_field(participant.email.as_deref().unwrap_or("")),
                csv_field(&periods),
            ));
        }

        Ok(ExportDocument {
            filename: format!("{}-participants.csv", slugify(&travel.name)),
            content,
        })
    }

    /// Write all four CSV documents into a directory.
    pub fn export_all_to_path(
        &self,
        request: ExportToPathRequest,
        settlement_service: &SettlementService,
    ) -> Result<ExportToPathResponse> {
        let directory = Path::new(&request.directory);
        fs::create_dir_all(directory)
            .with_context(|| format!("failed to create export directory {:?}", directory))?;

        let documents = vec![
            self.export_summary_csv(settlement_service)?,
            self.export_expenses_csv()?,
            self.export_contributions_csv()?,
            self.export_participants_csv()?,
        ];

        let mut written_files = Vec::with_capacity(documents.len());
        for document in documents {
            let path = directory.join(&document.filename);
            fs::write(&path, document.content)
                .with_context(|| format!("failed to write export file {:?}", path))?;
            written_files.push(path.to_string_lossy().into_owned());
        }

        info!("EXPORT: wrote {} files to {:?}", written_files.len(), directory);
        Ok(ExportToPathResponse { written_files })
    }

    /// Full travel backup as pretty-printed JSON, importable with
    /// [`ExportService::import_travel_json`].
    pub fn export_travel_json(&self) -> Result<ExportDocument> {
        let travel = self.current_travel()?;
        let dto = mappers::travel_to_dto(&travel);
        let content =
            serde_json::to_string_pretty(&dto).context("failed to serialize travel backup")?;

        // backup filenames keep the travel name readable, spaces as underscores
        let filename = format!(
            "{}_backup_{}.json",
            travel.name.split_whitespace().collect::<Vec<_>>().join("_"),
            Utc::now().date_naive()
        );

        info!("EXPORT: built JSON backup for '{}'", travel.name);
        Ok(ExportDocument { filename, content })
    }

    /// Read a travel back from a JSON backup and add it to the ledger. The
    /// imported travel is not selected as current.
    pub fn import_travel_json(
        &self,
        content: &str,
        travel_service: &TravelService,
    ) -> Result<Travel> {
        let dto: shared::Travel =
            serde_json::from_str(content).context("invalid travel backup JSON")?;
        let travel = mappers::travel_from_dto(dto)?;
        Ok(travel_service.insert_imported(travel))
    }

    fn current_travel(&self) -> Result<Travel> {
        self.store
            .current_travel()
            .ok_or_else(|| DomainError::NoCurrentTravel.into())
    }
}

fn participant_name<'a>(travel: &'a Travel, participant_id: &str) -> &'a str {
    travel
        .participant(participant_id)
        .map(|p| p.name.as_str())
        .unwrap_or("Unknown")
}

/// Filename slug: lowercase, whitespace to dashes, strip anything that is
/// not alphanumeric, dash, or underscore.
fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
