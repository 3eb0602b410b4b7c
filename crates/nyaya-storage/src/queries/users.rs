// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account operations on the `users` table.

use nyaya_core::{NyayaError, UserAccount};
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

const SELECT_USER: &str = "SELECT firebase_uid, email, attempts_left, last_login, created_at
     FROM users WHERE firebase_uid = ?1";

pub(crate) fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserAccount> {
    Ok(UserAccount {
        firebase_uid: row.get(0)?,
        email: row.get(1)?,
        attempts_left: row.get(2)?,
        last_login: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Fetch an account by identity id.
pub async fn get_user(db: &Database, firebase_uid: &str) -> Result<Option<UserAccount>, NyayaError> {
    let firebase_uid = firebase_uid.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<UserAccount>, rusqlite::Error> {
            conn.query_row(SELECT_USER, params![firebase_uid], row_to_user)
                .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch an account, inserting it first when it does not exist.
///
/// The insert and the read run in the same closure on the writer thread, so
/// two concurrent first requests for one identity produce exactly one row.
pub async fn get_or_create_user(
    db: &Database,
    firebase_uid: &str,
    email: &str,
    default_attempts: i64,
) -> Result<UserAccount, NyayaError> {
    let firebase_uid = firebase_uid.to_string();
    let email = email.to_string();
    let (user, created) = db
        .connection()
        .call(move |conn| -> Result<(UserAccount, bool), rusqlite::Error> {
            let inserted = conn.execute(
                "INSERT INTO users (firebase_uid, email, attempts_left) VALUES (?1, ?2, ?3)
                 ON CONFLICT(firebase_uid) DO NOTHING",
                params![firebase_uid, email, default_attempts],
            )?;
            let user = conn.query_row(SELECT_USER, params![firebase_uid], row_to_user)?;
            Ok((user, inserted == 1))
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    if created {
        tracing::info!(
            user_id = %user.firebase_uid,
            attempts_left = user.attempts_left,
            "created account"
        );
    }
    Ok(user)
}

/// Decrement `attempts_left` if it is positive, bumping `last_login`.
///
/// Only called inside the answer-commit transaction.
pub(crate) fn decrement_in(
    conn: &rusqlite::Connection,
    firebase_uid: &str,
) -> rusqlite::Result<Option<i64>> {
    conn.query_row(
        "UPDATE users
         SET attempts_left = attempts_left - 1,
             last_login = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
         WHERE firebase_uid = ?1 AND attempts_left > 0
         RETURNING attempts_left",
        params![firebase_uid],
        |row| row.get(0),
    )
    .optional()
}

/// Bump `last_login` without charging. Returns the unchanged count.
pub(crate) fn touch_in(
    conn: &rusqlite::Connection,
    firebase_uid: &str,
) -> rusqlite::Result<Option<i64>> {
    conn.query_row(
        "UPDATE users
         SET last_login = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
         WHERE firebase_uid = ?1
         RETURNING attempts_left",
        params![firebase_uid],
        |row| row.get(0),
    )
    .optional()
}
