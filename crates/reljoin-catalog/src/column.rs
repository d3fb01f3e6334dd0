use reljoin_types::DataType;

/// Column definition in a table schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        ColumnSchema { name: name.into(), data_type, nullable }
    }

    /// Copy of this column that admits NULL, used for null-extended join sides.
    pub fn as_nullable(&self) -> Self {
        ColumnSchema { nullable: true, ..self.clone() }
    }

    /// Copy of this column under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        ColumnSchema { name: name.into(), ..self.clone() }
    }
}
