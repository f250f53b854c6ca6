//! Table and export definitions for each resource

use crate::{
    export::{CellValue, ExportRow},
    table::{Cell, ColumnDescriptor, RowAction},
};
use sensorboard_core::{
    Session,
    models::{Expense, Income, Record, Report, SensorReading},
    time::format_timestamp,
};
use serde::de::DeserializeOwned;

/// A resource with a list page, an export and optional row actions
pub trait TableResource: Record + DeserializeOwned + Send + Sync + 'static {
    /// Page heading
    const TITLE: &'static str;

    /// Leading part of the export file name
    const EXPORT_LABEL: &'static str;

    const EXPORT_HEADERS: &'static [&'static str];

    /// Rows can be edited through the entry form
    const EDITABLE: bool = false;

    /// Rows can be deleted by a super admin
    const DELETABLE: bool = true;

    /// Columns between `No` and `Di buat pada`
    fn data_columns() -> Vec<ColumnDescriptor<Self>>;

    /// Values in `EXPORT_HEADERS` order
    fn export_row(&self) -> ExportRow;
}

/// Income and expense entries, managed through the create/edit forms
pub trait EntryResource: TableResource {
    fn name(&self) -> &str;
    fn nominal(&self) -> &str;
}

/// Final column list for a list page
///
/// Row numbers continue across pages. The action column is only added for a
/// super admin and only when the resource has actions at all.
pub fn columns<R: TableResource>(page: u64, size: u64, session: &Session) -> Vec<ColumnDescriptor<R>> {
    let offset = page.saturating_mul(size);

    let mut columns = vec![ColumnDescriptor::new("No", move |_: &R, index| {
        Cell::text(offset.saturating_add(index as u64).saturating_add(1).to_string())
    })];
    columns.extend(R::data_columns());
    columns.push(ColumnDescriptor::new("Di buat pada", |row: &R, _| {
        Cell::text(format_timestamp(row.created_at()))
    }));

    if session.is_super_admin() && (R::EDITABLE || R::DELETABLE) {
        columns.push(ColumnDescriptor::action("Aksi", |row: &R, _| {
            Cell::Actions(row_actions(row))
        }));
    }

    columns
}

fn row_actions<R: TableResource>(row: &R) -> Vec<RowAction> {
    let route = R::RESOURCE.route();
    let mut actions = Vec::new();
    if R::EDITABLE {
        actions.push(RowAction::Edit {
            href: format!("{}/edit/{}", route, row.id()),
        });
    }
    if R::DELETABLE {
        actions.push(RowAction::Delete {
            action: format!("{}/delete", route),
            field: R::RESOURCE.id_field(),
            id: row.id().to_string(),
        });
    }
    actions
}

impl TableResource for SensorReading {
    const TITLE: &'static str = "Data Sensor";
    const EXPORT_LABEL: &'static str = "Data Sensor";
    const EXPORT_HEADERS: &'static [&'static str] = &["Temperature", "Humidity", "Tgl Dibuat"];

    fn data_columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("Temperature", |row: &Self, _| {
                Cell::text(format!("{}°C", row.dht_sensor_temperature))
            }),
            ColumnDescriptor::new("Humidity", |row: &Self, _| {
                Cell::text(format!("{} %", row.dht_sensor_humidity))
            }),
        ]
    }

    fn export_row(&self) -> ExportRow {
        vec![
            self.dht_sensor_temperature.into(),
            self.dht_sensor_humidity.into(),
            format_timestamp(&self.created_at).into(),
        ]
    }
}

impl TableResource for Income {
    const TITLE: &'static str = "Income";
    const EXPORT_LABEL: &'static str = "Income";
    const EXPORT_HEADERS: &'static [&'static str] = &["Nama", "Nominal", "Tgl Dibuat"];
    const EDITABLE: bool = true;

    fn data_columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("Nama", |row: &Self, _| Cell::text(row.income_name.as_str())),
            ColumnDescriptor::new("Nominal", |row: &Self, _| {
                Cell::text(row.income_nominal.as_str())
            }),
        ]
    }

    fn export_row(&self) -> ExportRow {
        vec![
            self.income_name.as_str().into(),
            CellValue::nominal(&self.income_nominal),
            format_timestamp(&self.created_at).into(),
        ]
    }
}

impl EntryResource for Income {
    fn name(&self) -> &str {
        &self.income_name
    }

    fn nominal(&self) -> &str {
        &self.income_nominal
    }
}

impl TableResource for Expense {
    const TITLE: &'static str = "Expense";
    const EXPORT_LABEL: &'static str = "Expense";
    const EXPORT_HEADERS: &'static [&'static str] = &["Nama", "Nominal", "Tgl Dibuat"];
    const EDITABLE: bool = true;

    fn data_columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("Nama", |row: &Self, _| Cell::text(row.expense_name.as_str())),
            ColumnDescriptor::new("Nominal", |row: &Self, _| {
                Cell::text(row.expense_nominal.as_str())
            }),
        ]
    }

    fn export_row(&self) -> ExportRow {
        vec![
            self.expense_name.as_str().into(),
            CellValue::nominal(&self.expense_nominal),
            format_timestamp(&self.created_at).into(),
        ]
    }
}

impl EntryResource for Expense {
    fn name(&self) -> &str {
        &self.expense_name
    }

    fn nominal(&self) -> &str {
        &self.expense_nominal
    }
}

impl TableResource for Report {
    const TITLE: &'static str = "Reports";
    const EXPORT_LABEL: &'static str = "Reports";
    const EXPORT_HEADERS: &'static [&'static str] = &["Nama", "Income", "Expense", "Tgl Dibuat"];
    const DELETABLE: bool = false;

    fn data_columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("Nama", |row: &Self, _| Cell::text(row.report_name.as_str())),
            ColumnDescriptor::new("Income", |row: &Self, _| Cell::text(row.report_income.to_string())),
            ColumnDescriptor::new("Expense", |row: &Self, _| {
                Cell::text(row.report_expense.to_string())
            }),
        ]
    }

    fn export_row(&self) -> ExportRow {
        vec![
            self.report_name.as_str().into(),
            self.report_income.into(),
            self.report_expense.into(),
            format_timestamp(&self.created_at).into(),
        ]
    }
}
