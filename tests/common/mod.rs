#![allow(dead_code)]

use citegraph::{CitationGraph, Publication};

/// Id that [`Picky`] refuses to be built with.
pub const UNPUBLISHABLE: u32 = 666;
/// Id that [`Picky`] refuses to cite.
pub const UNCITABLE: u32 = 13;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paper {
    pub id: u32,
    pub cites: Vec<u32>,
}

impl Publication for Paper {
    type Id = u32;
    type Error = std::convert::Infallible;

    fn create(id: u32) -> Result<Self, Self::Error> {
        Ok(Paper { id, cites: Vec::new() })
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn record_citation(&mut self, cited: u32) -> Result<(), Self::Error> {
        self.cites.push(cited);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    #[error("publication {0} cannot be built")]
    Unpublishable(u32),
    #[error("publication {0} cannot be cited")]
    Uncitable(u32),
}

/// A publication that fails on purpose, to exercise rollback.
#[derive(Debug)]
pub struct Picky {
    pub id: u32,
    pub cites: Vec<u32>,
}

impl Publication for Picky {
    type Id = u32;
    type Error = Rejected;

    fn create(id: u32) -> Result<Self, Rejected> {
        if id == UNPUBLISHABLE {
            return Err(Rejected::Unpublishable(id));
        }
        Ok(Picky { id, cites: Vec::new() })
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn record_citation(&mut self, cited: u32) -> Result<(), Rejected> {
        if cited == UNCITABLE {
            return Err(Rejected::Uncitable(cited));
        }
        self.cites.push(cited);
        Ok(())
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

pub fn papers(root: u32) -> CitationGraph<Paper> {
    init_tracing();
    CitationGraph::new(root).expect("root paper")
}

/// Snapshot of everything observable about a graph, used to check that failed calls change nothing.
#[derive(Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub ids: Vec<u32>,
    pub edges: Vec<(u32, Vec<u32>)>,
    pub revision: u64,
}

pub fn snapshot<P: Publication<Id = u32>>(graph: &CitationGraph<P>) -> Snapshot {
    let ids = graph.ids();
    let edges = ids
        .iter()
        .map(|&id| (id, graph.get_children(id).expect("listed id exists")))
        .collect();
    Snapshot {
        ids,
        edges,
        revision: graph.revision().get(),
    }
}
