//! Client-side record store and its table projection.
//!
//! # Design
//! The store is the only copy of the data the console holds. `Table` is
//! computed from the store and the outcome of the last load every time it
//! is asked for, so rendering never mutates anything.

use std::collections::HashMap;
use std::fmt;

use crate::entity::{Entity, Schema};

/// Records of one entity type, in the order the server listed them.
#[derive(Debug, Clone)]
pub struct EntityStore<E> {
    records: Vec<E>,
    index: HashMap<i64, usize>,
}

impl<E> Default for EntityStore<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<E: Entity> EntityStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, records: Vec<E>) {
        self.index = records
            .iter()
            .enumerate()
            .filter_map(|(pos, record)| record.id().map(|id| (id, pos)))
            .collect();
        self.records = records;
    }

    pub fn get(&self, id: i64) -> Option<&E> {
        self.index.get(&id).map(|&pos| &self.records[pos])
    }

    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Outcome of the most recent list load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    NotLoaded,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Rows(Vec<Vec<String>>),
    /// A single message spanning every column.
    Placeholder(String),
}

/// Rendered list view of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub body: TableBody,
}

impl Table {
    pub fn project<E: Entity>(store: &EntityStore<E>, status: &LoadStatus) -> Self {
        let schema: Schema = E::SCHEMA;
        let columns = schema.columns.iter().map(|c| c.to_string()).collect();
        let body = match status {
            LoadStatus::NotLoaded => TableBody::Placeholder("Carregando...".to_string()),
            LoadStatus::Failed(message) => TableBody::Placeholder(message.clone()),
            LoadStatus::Loaded if store.is_empty() => TableBody::Placeholder(schema.empty_message()),
            LoadStatus::Loaded => TableBody::Rows(store.records().iter().map(Entity::cells).collect()),
        };
        Self { columns, body }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Placeholder(_) => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.body {
            TableBody::Placeholder(message) => Some(message),
            TableBody::Rows(_) => None,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in self.rows() {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(f, &self.columns, &widths)?;
        let total = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        writeln!(f, "{}", "-".repeat(total))?;

        match &self.body {
            TableBody::Rows(rows) => rows.iter().try_for_each(|row| write_row(f, row, &widths)),
            TableBody::Placeholder(message) => writeln!(f, "{message:^total$}"),
        }
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(f, "{}", line.trim_end())
}
