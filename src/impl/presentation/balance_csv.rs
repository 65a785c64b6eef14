use crate::entities::TrialBalance;
use crate::errors::LedgerError;

use super::amount_fmt::format_fixed;
use super::csv_writer;

/// Semicolon-delimited trial balance export.
///
/// Row protocol: one header row, then per class a class header row, one row
/// per account and a class subtotal row, closed by a single grand-total
/// row. Column order is fixed: account code, label, debit, credit, balance.
pub(crate) struct BalanceCsvPrinter;

impl BalanceCsvPrinter {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn print(&self, balance: &TrialBalance) -> Result<String, LedgerError> {
        let mut writer = csv_writer::semicolon_writer();
        csv_writer::write_row(
            &mut writer,
            &["N. Compte", "Libelle", "Debit", "Credit", "Solde"],
        )?;

        for section in &balance.classes {
            csv_writer::write_row(
                &mut writer,
                &[
                    &format!("Classe {}", section.class.digit()),
                    section.class.label(),
                    "",
                    "",
                    "",
                ],
            )?;
            for account in &section.accounts {
                csv_writer::write_row(
                    &mut writer,
                    &[
                        &account.code,
                        &account.label,
                        &format_fixed(account.debit),
                        &format_fixed(account.credit),
                        &format_fixed(account.net_balance()),
                    ],
                )?;
            }
            csv_writer::write_row(
                &mut writer,
                &[
                    "",
                    &format!("Sous-total Classe {}", section.class.digit()),
                    &format_fixed(section.debit_total),
                    &format_fixed(section.credit_total),
                    &format_fixed(section.debit_total - section.credit_total),
                ],
            )?;
        }

        csv_writer::write_row(
            &mut writer,
            &[
                "",
                "TOTAL GENERAL",
                &format_fixed(balance.grand_debit),
                &format_fixed(balance.grand_credit),
                &format_fixed(balance.net_balance()),
            ],
        )?;

        csv_writer::into_string(writer)
    }
}
