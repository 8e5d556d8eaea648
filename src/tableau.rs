mod column_major;
mod row_major;

pub use column_major::ColumnMajorTableau;
pub use row_major::RowMajorTableau;
