//! `SQLite` implementation of [`RuleRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use acrules_app::ports::RuleRepository;
use acrules_domain::error::AcRulesError;
use acrules_domain::id::RuleId;
use acrules_domain::rule::{AcAction, AcMode, FanSpeed, NewRule, Rule, Swing, TempRange, TimeWindow};

use crate::error::StorageError;

struct Wrapper(Rule);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Rule> {
        value.map(|w| w.0)
    }
}

fn decode_code<T: TryFrom<u8, Error = u8>>(
    row: &SqliteRow,
    column: &'static str,
) -> Result<T, sqlx::Error> {
    let raw: u8 = row.try_get(column)?;
    T::try_from(raw).map_err(|value| {
        sqlx::Error::Decode(Box::new(StorageError::InvalidColumn {
            column,
            value: i64::from(value),
        }))
    })
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let raw_id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let enabled: bool = row.try_get("enabled")?;
        let start_hour: Option<u8> = row.try_get("start_hour")?;
        let end_hour: Option<u8> = row.try_get("end_hour")?;
        let min_temp: Option<f32> = row.try_get("min_temp")?;
        let max_temp: Option<f32> = row.try_get("max_temp")?;

        let id = RuleId::try_from(raw_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let schedule = match (start_hour, end_hour) {
            (Some(start), Some(end)) => Some(
                TimeWindow::new(start, end).map_err(|err| sqlx::Error::Decode(Box::new(err)))?,
            ),
            _ => None,
        };
        let action = AcAction {
            power: row.try_get("power")?,
            set_temp: row.try_get("set_temp")?,
            fan_speed: decode_code::<FanSpeed>(row, "fan_speed")?,
            mode: decode_code::<AcMode>(row, "mode")?,
            v_swing: decode_code::<Swing>(row, "v_swing")?,
            h_swing: decode_code::<Swing>(row, "h_swing")?,
        };

        Ok(Self(Rule {
            id,
            name,
            enabled,
            schedule,
            temperature: TempRange {
                min: min_temp,
                max: max_temp,
            },
            action,
        }))
    }
}

/// `SQLite`-backed rule repository.
///
/// Ids come from `AUTOINCREMENT`, so a deleted rule's id is never reused and
/// `ORDER BY id` is creation order.
pub struct SqliteRuleRepository {
    pool: SqlitePool,
}

impl SqliteRuleRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RuleRepository for SqliteRuleRepository {
    async fn create(&self, rule: NewRule) -> Result<Rule, AcRulesError> {
        let (start_hour, end_hour) = split_window(rule.schedule);
        let result = sqlx::query(
            "INSERT INTO rules (name, enabled, start_hour, end_hour, min_temp, max_temp, power, set_temp, fan_speed, mode, v_swing, h_swing) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&rule.name)
        .bind(rule.enabled)
        .bind(start_hour)
        .bind(end_hour)
        .bind(rule.temperature.min)
        .bind(rule.temperature.max)
        .bind(rule.action.power)
        .bind(rule.action.set_temp)
        .bind(rule.action.fan_speed.code())
        .bind(rule.action.mode.code())
        .bind(rule.action.v_swing.code())
        .bind(rule.action.h_swing.code())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        let id = RuleId::try_from(result.last_insert_rowid())?;
        Ok(rule.with_id(id))
    }

    async fn create_within_limit(
        &self,
        rule: NewRule,
        limit: usize,
    ) -> Result<Option<Rule>, AcRulesError> {
        let (start_hour, end_hour) = split_window(rule.schedule);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        // Count and insert in one statement.
        let result = sqlx::query(
            "INSERT INTO rules (name, enabled, start_hour, end_hour, min_temp, max_temp, power, set_temp, fan_speed, mode, v_swing, h_swing) SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ? WHERE (SELECT COUNT(*) FROM rules) < ?",
        )
        .bind(&rule.name)
        .bind(rule.enabled)
        .bind(start_hour)
        .bind(end_hour)
        .bind(rule.temperature.min)
        .bind(rule.temperature.max)
        .bind(rule.action.power)
        .bind(rule.action.set_temp)
        .bind(rule.action.fan_speed.code())
        .bind(rule.action.mode.code())
        .bind(rule.action.v_swing.code())
        .bind(rule.action.h_swing.code())
        .bind(limit)
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        let id = RuleId::try_from(result.last_insert_rowid())?;
        Ok(Some(rule.with_id(id)))
    }

    async fn get_by_id(&self, id: RuleId) -> Result<Option<Rule>, AcRulesError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM rules WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Rule>, AcRulesError> {
        let rows: Vec<Wrapper> = sqlx::query_as("SELECT * FROM rules ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, rule: Rule) -> Result<Rule, AcRulesError> {
        let (start_hour, end_hour) = split_window(rule.schedule);
        sqlx::query(
            "UPDATE rules SET name = ?, enabled = ?, start_hour = ?, end_hour = ?, min_temp = ?, max_temp = ?, power = ?, set_temp = ?, fan_speed = ?, mode = ?, v_swing = ?, h_swing = ? WHERE id = ?",
        )
        .bind(&rule.name)
        .bind(rule.enabled)
        .bind(start_hour)
        .bind(end_hour)
        .bind(rule.temperature.min)
        .bind(rule.temperature.max)
        .bind(rule.action.power)
        .bind(rule.action.set_temp)
        .bind(rule.action.fan_speed.code())
        .bind(rule.action.mode.code())
        .bind(rule.action.v_swing.code())
        .bind(rule.action.h_swing.code())
        .bind(rule.id.get())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(rule)
    }

    async fn delete(&self, id: RuleId) -> Result<bool, AcRulesError> {
        let result = sqlx::query("DELETE FROM rules WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize, AcRulesError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rules")
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;
        usize::try_from(count).map_err(|_| {
            StorageError::InvalidColumn {
                column: "COUNT(*)",
                value: count,
            }
            .into()
        })
    }
}

fn split_window(window: Option<TimeWindow>) -> (Option<u8>, Option<u8>) {
    window.map_or((None, None), |w| (Some(w.start()), Some(w.end())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use acrules_domain::defaults::default_rules;

    async fn setup() -> SqliteRuleRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteRuleRepository::new(db.pool().clone())
    }

    fn valid_rule() -> NewRule {
        Rule::builder()
            .name("Cool Night")
            .hours(19, 8)
            .min_temp(26.0)
            .turn_on(28.0)
            .fan_speed(FanSpeed::Low)
            .swing(Swing::Mid, Swing::Mid)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_rule() {
        let repo = setup().await;
        let created = repo.create(valid_rule()).await.unwrap();
        assert_eq!(created.id.get(), 1);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn should_store_absent_constraints_as_null() {
        let repo = setup().await;
        let rule = Rule::builder()
            .name("Turn Off When Cool")
            .max_temp(25.9)
            .turn_off()
            .build()
            .unwrap();

        let created = repo.create(rule).await.unwrap();

        let (start, min): (Option<i64>, Option<f64>) =
            sqlx::query_as("SELECT start_hour, min_temp FROM rules WHERE id = ?")
                .bind(created.id.get())
                .fetch_one(&repo.pool)
                .await
                .unwrap();
        assert_eq!((start, min), (None, None));

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert!(fetched.schedule.is_none());
        assert_eq!(fetched.temperature.max, Some(25.9));
        assert!(!fetched.action.power);
    }

    #[tokio::test]
    async fn should_insert_only_while_below_limit() {
        let repo = setup().await;
        let first = repo.create_within_limit(valid_rule(), 2).await.unwrap();
        let second = repo.create_within_limit(valid_rule(), 2).await.unwrap();
        let third = repo.create_within_limit(valid_rule(), 2).await.unwrap();

        assert_eq!(first.map(|r| r.id.get()), Some(1));
        assert_eq!(second.map(|r| r.id.get()), Some(2));
        assert!(third.is_none());
        assert_eq!(repo.count().await.unwrap(), 2);

        let stored = repo.get_by_id(RuleId::new(2).unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.schedule, Some(TimeWindow::new(19, 8).unwrap()));
    }

    #[tokio::test]
    async fn should_return_none_when_rule_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(RuleId::new(42).unwrap()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_rules_in_creation_order() {
        let repo = setup().await;
        for rule in default_rules() {
            repo.create(rule).await.unwrap();
        }

        let all = repo.get_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Cool Day", "Cool Night", "Turn Off When Cool"]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn should_update_rule() {
        let repo = setup().await;
        let mut rule = repo.create(valid_rule()).await.unwrap();

        rule.enabled = false;
        rule.schedule = None;
        rule.action.mode = AcMode::Dry;
        repo.update(rule.clone()).await.unwrap();

        let fetched = repo.get_by_id(rule.id).await.unwrap().unwrap();
        assert_eq!(fetched, rule);
    }

    #[tokio::test]
    async fn should_delete_rule_and_report_missing() {
        let repo = setup().await;
        let created = repo.create(valid_rule()).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn should_not_reuse_ids_after_delete() {
        let repo = setup().await;
        let first = repo.create(valid_rule()).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let second = repo.create(valid_rule()).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn should_fail_decoding_unknown_mode_code() {
        let repo = setup().await;
        let created = repo.create(valid_rule()).await.unwrap();
        sqlx::query("UPDATE rules SET mode = 9 WHERE id = ?")
            .bind(created.id.get())
            .execute(&repo.pool)
            .await
            .unwrap();

        let result = repo.get_by_id(created.id).await;
        assert!(matches!(result, Err(AcRulesError::Storage(_))));
    }
}
