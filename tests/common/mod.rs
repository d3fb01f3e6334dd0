//! Worked-example relations shared by the root integration tests

use reljoin::{ColumnSchema, DataType, Relation, SqlValue, TableSchema};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn text() -> DataType {
    DataType::Varchar { max_length: None }
}

fn relation(name: &str, columns: &[&str], rows: &[&[&str]]) -> Relation {
    let schema = TableSchema::try_new(
        name,
        columns.iter().map(|column| ColumnSchema::new(*column, text(), false)).collect(),
    )
    .unwrap();
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|value| SqlValue::varchar(*value)).collect())
        .collect();
    Relation::new(schema, rows).unwrap()
}

pub fn employee() -> Relation {
    relation(
        "employee",
        &["EmpID", "Name", "DeptID"],
        &[
            &["E1001", "Kevin", "D501"],
            &["E1002", "David", "D502"],
            &["E1003", "Ben", "D502"],
            &["E1004", "Linda", "D503"],
            &["E1005", "Olivia", "D504"],
        ],
    )
}

pub fn department() -> Relation {
    relation(
        "department",
        &["DeptID", "Name"],
        &[
            &["D501", "Engineering"],
            &["D502", "Sales"],
            &["D503", "Marketing"],
            &["D525", "IT"],
        ],
    )
}

pub fn location() -> Relation {
    relation(
        "location",
        &["CityCode", "Name"],
        &[&["SYD", "Sydney"], &["MEL", "Melbourne"], &["ADL", "Adelaide"]],
    )
}
