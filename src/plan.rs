//! Scripted layouts: apply `+<level>` / `-<level>` / `~<level>` steps to an
//! empty engine, for the `plan` subcommand.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use crate::catalog::{Catalog, LevelId};
use crate::tiling::TilingEngine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanOp {
    Open(LevelId),
    Close(LevelId),
    Toggle(LevelId),
}

impl PlanOp {
    pub fn level(self) -> LevelId {
        match self {
            PlanOp::Open(id) | PlanOp::Close(id) | PlanOp::Toggle(id) => id,
        }
    }
}

impl FromStr for PlanOp {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        let op: fn(LevelId) -> PlanOp = match chars.next() {
            Some('+') => PlanOp::Open,
            Some('-') => PlanOp::Close,
            Some('~') => PlanOp::Toggle,
            _ => bail!("`{}`: expected +<level>, -<level> or ~<level>", s),
        };
        let id: u32 = chars
            .as_str()
            .parse()
            .map_err(|_| anyhow!("`{}`: level must be a number", s))?;
        Ok(op(LevelId(id)))
    }
}

impl fmt::Display for PlanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanOp::Open(id) => write!(f, "+{}", id),
            PlanOp::Close(id) => write!(f, "-{}", id),
            PlanOp::Toggle(id) => write!(f, "~{}", id),
        }
    }
}

pub fn parse_ops<S: AsRef<str>>(args: &[S]) -> Result<Vec<PlanOp>> {
    args.iter().map(|a| a.as_ref().parse()).collect()
}

/// Reject steps naming levels the catalog does not know.
pub fn check_levels(ops: &[PlanOp], catalog: &Catalog) -> Result<()> {
    match ops.iter().find(|op| catalog.level(op.level()).is_none()) {
        Some(op) => bail!("`{}`: unknown level {}", op, op.level()),
        None => Ok(()),
    }
}

/// Apply `ops` in order, stopping at the first one the engine rejects.
pub fn apply(engine: &mut TilingEngine<LevelId>, ops: &[PlanOp]) -> Result<()> {
    for (step, &op) in ops.iter().enumerate() {
        let context = || format!("step {} (`{}`)", step + 1, op);
        match op {
            PlanOp::Open(level) => {
                if engine.find(&level).is_some() {
                    bail!("{}: level {} is already open", context(), level);
                }
                engine.open(level).with_context(context)?;
            }
            PlanOp::Close(level) => {
                let id = engine
                    .find(&level)
                    .ok_or_else(|| anyhow!("{}: level {} is not open", context(), level))?;
                engine.close(id).with_context(context)?;
            }
            PlanOp::Toggle(level) => {
                engine.toggle(level).with_context(context)?;
            }
        }
    }
    Ok(())
}
