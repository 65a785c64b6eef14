use crate::entities::{VatBreakdown, VatBucketKey};
use crate::errors::LedgerError;

use super::amount_fmt::format_fixed;
use super::csv_writer;

/// Formulaire 200 export: the statutory cases followed by the per-rate
/// detail table. Case numbering follows the AFC form layout.
pub(crate) struct VatFormPrinter;

impl VatFormPrinter {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn print(
        &self,
        breakdown: &VatBreakdown,
        period_label: &str,
    ) -> Result<String, LedgerError> {
        let mut writer = csv_writer::semicolon_writer();
        let collected_of = |key: VatBucketKey| {
            breakdown.line(key).map(|l| l.collected).unwrap_or(0.0)
        };

        csv_writer::write_row(&mut writer, &["Formulaire 200 AFC", period_label])?;
        csv_writer::write_row(&mut writer, &[""])?;
        csv_writer::write_row(&mut writer, &["Case", "Description", "Montant CHF"])?;
        csv_writer::write_row(
            &mut writer,
            &["200", "Chiffre d'affaires total", &format_fixed(breakdown.total_turnover)],
        )?;
        csv_writer::write_row(
            &mut writer,
            &["205", "Chiffre d'affaires imposable", &format_fixed(breakdown.total_turnover)],
        )?;
        csv_writer::write_row(
            &mut writer,
            &["220", "TVA au taux normal (8.1%)", &format_fixed(collected_of(VatBucketKey::Standard))],
        )?;
        csv_writer::write_row(
            &mut writer,
            &["221", "TVA au taux reduit (2.6%)", &format_fixed(collected_of(VatBucketKey::Reduced))],
        )?;
        csv_writer::write_row(
            &mut writer,
            &["225", "TVA hebergement (3.8%)", &format_fixed(collected_of(VatBucketKey::Accommodation))],
        )?;
        csv_writer::write_row(
            &mut writer,
            &["", "Total TVA collectee", &format_fixed(breakdown.total_collected)],
        )?;
        csv_writer::write_row(
            &mut writer,
            &["400", "Impot prealable (TVA deductible)", &format_fixed(breakdown.total_deductible)],
        )?;
        csv_writer::write_row(
            &mut writer,
            &["500", "Solde TVA a payer", &format_fixed(breakdown.net_payable)],
        )?;
        csv_writer::write_row(
            &mut writer,
            &["510", "Excedent (credit TVA)", &format_fixed(breakdown.net_credit)],
        )?;

        csv_writer::write_row(&mut writer, &[""])?;
        csv_writer::write_row(&mut writer, &["Detail par taux"])?;
        csv_writer::write_row(
            &mut writer,
            &["Taux", "CA HT", "TVA collectee", "Impot prealable", "Solde"],
        )?;
        for line in &breakdown.lines {
            csv_writer::write_row(
                &mut writer,
                &[
                    &line.display,
                    &format_fixed(line.turnover),
                    &format_fixed(line.collected),
                    &format_fixed(line.deductible),
                    &format_fixed(line.net()),
                ],
            )?;
        }

        csv_writer::into_string(writer)
    }
}
