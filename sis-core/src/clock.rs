//! Источник времени для метки в заголовке.

use chrono::{Local, NaiveDateTime};

/// Источник «текущего» времени для [`SisHeaderExt::new`](crate::SisHeaderExt::new).
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Локальное время системы.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

/// Всегда возвращает одно и то же время. Нужен для детерминированных файлов.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
