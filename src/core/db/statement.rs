/// Statement Building Module
///
/// Builds the parameterized SQL text issued by table gateways. Table and
/// column names are always quoted; values are never written into the text and
/// travel as named parameters instead.

/// Placeholder name bound to the primary-key value
pub const KEY_PARAM: &str = ":key";

/// SQL text together with the placeholder names it expects, in bind order
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<String>,
}

/// Quotes an identifier for SQLite, doubling embedded quotes
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Placeholder name for the data field at `index`
pub fn value_param(index: usize) -> String {
    format!(":v{}", index)
}

/// `INSERT INTO "table" ("a", "b") VALUES (:v0, :v1)`
///
/// With no columns the statement falls back to `DEFAULT VALUES`.
pub fn insert<'a, I>(table: &str, columns: I) -> Statement
where
    I: IntoIterator<Item = &'a str>,
{
    let columns: Vec<&str> = columns.into_iter().collect();
    if columns.is_empty() {
        return Statement {
            sql: format!("INSERT INTO {} DEFAULT VALUES", quote_identifier(table)),
            params: Vec::new(),
        };
    }

    let params: Vec<String> = (0..columns.len()).map(value_param).collect();
    let column_list = columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ");

    Statement {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_identifier(table),
            column_list,
            params.join(", ")
        ),
        params,
    }
}

/// `SELECT * FROM "table"`
pub fn select_all(table: &str) -> Statement {
    Statement {
        sql: format!("SELECT * FROM {}", quote_identifier(table)),
        params: Vec::new(),
    }
}

/// `SELECT * FROM "table" WHERE "id" = :key`
pub fn select_by_key(table: &str, id_field: &str) -> Statement {
    Statement {
        sql: format!(
            "SELECT * FROM {} WHERE {} = {}",
            quote_identifier(table),
            quote_identifier(id_field),
            KEY_PARAM
        ),
        params: vec![KEY_PARAM.to_string()],
    }
}

/// `UPDATE "table" SET "a" = :v0, "b" = :v1 WHERE "id" = :key`
///
/// Callers reject empty column lists before building.
pub fn update<'a, I>(table: &str, id_field: &str, columns: I) -> Statement
where
    I: IntoIterator<Item = &'a str>,
{
    let mut params = Vec::new();
    let assignments = columns
        .into_iter()
        .enumerate()
        .map(|(index, column)| {
            let param = value_param(index);
            let assignment = format!("{} = {}", quote_identifier(column), param);
            params.push(param);
            assignment
        })
        .collect::<Vec<_>>()
        .join(", ");
    params.push(KEY_PARAM.to_string());

    Statement {
        sql: format!(
            "UPDATE {} SET {} WHERE {} = {}",
            quote_identifier(table),
            assignments,
            quote_identifier(id_field),
            KEY_PARAM
        ),
        params,
    }
}

/// `DELETE FROM "table" WHERE "id" = :key`
pub fn delete(table: &str, id_field: &str) -> Statement {
    Statement {
        sql: format!(
            "DELETE FROM {} WHERE {} = {}",
            quote_identifier(table),
            quote_identifier(id_field),
            KEY_PARAM
        ),
        params: vec![KEY_PARAM.to_string()],
    }
}
