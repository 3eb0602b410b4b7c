// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Question/answer history operations on the `qa_records` table.

use std::str::FromStr;

use nyaya_core::{FileType, Language, NyayaError, QaRecord};
use rusqlite::params;
use rusqlite::types::Type;

use crate::database::Database;
use crate::queries::users;

fn parse_column<T>(idx: usize, value: &str) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<QaRecord> {
    let language: String = row.get(4)?;
    let file_type: Option<String> = row.get(6)?;
    Ok(QaRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        question: row.get(2)?,
        answer: row.get(3)?,
        language: parse_column::<Language>(4, &language)?,
        file_url: row.get(5)?,
        file_type: file_type
            .as_deref()
            .map(|s| parse_column::<FileType>(6, s))
            .transpose()?,
        created_at: row.get(7)?,
    })
}

fn insert_in(conn: &rusqlite::Connection, record: &QaRecord) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO qa_records
             (id, user_id, question, answer, language, file_url, file_type, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            record.id,
            record.user_id,
            record.question,
            record.answer,
            record.language.to_string(),
            record.file_url,
            record.file_type.map(|t| t.to_string()),
            record.created_at,
        ],
    )?;
    Ok(())
}

/// Insert the record and charge (or just touch) the account atomically.
///
/// Returns the remaining attempts, or `None` when the account has no
/// attempt left to charge (or does not exist). In that case nothing is written.
pub async fn commit_answer(
    db: &Database,
    record: &QaRecord,
    charge: bool,
) -> Result<Option<i64>, NyayaError> {
    let record = record.clone();
    db.connection()
        .call(move |conn| -> Result<Option<i64>, rusqlite::Error> {
            let tx = conn.transaction()?;
            let remaining = if charge {
                users::decrement_in(&tx, &record.user_id)?
            } else {
                users::touch_in(&tx, &record.user_id)?
            };
            let Some(remaining) = remaining else {
                tx.rollback()?;
                return Ok(None);
            };
            insert_in(&tx, &record)?;
            tx.commit()?;
            Ok(Some(remaining))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List a user's records, newest first.
pub async fn list_for_user(
    db: &Database,
    user_id: &str,
    limit: i64,
) -> Result<Vec<QaRecord>, NyayaError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| -> Result<Vec<QaRecord>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, question, answer, language, file_url, file_type, created_at
                 FROM qa_records WHERE user_id = ?1
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![user_id, limit], row_to_record)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}
