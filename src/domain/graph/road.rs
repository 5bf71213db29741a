use std::fmt;

use crate::api::road_dto::RoadDto;
use crate::domain::ids::{EdgeName, NodeId};
use crate::error::{Error, Result};

/// Administrative state of a road. Only `Open` edges participate in
/// planning; `Closed` and `Maintenance` are equivalent for the planner and
/// differ only for operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadStatus {
    Open,
    Closed,
    Maintenance,
}

impl RoadStatus {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "open" => Ok(RoadStatus::Open),
            "closed" => Ok(RoadStatus::Closed),
            "maintenance" => Ok(RoadStatus::Maintenance),
            other => Err(Error::InvalidRequest(format!("unknown road status '{}'", other))),
        }
    }
}

impl fmt::Display for RoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoadStatus::Open => "open",
            RoadStatus::Closed => "closed",
            RoadStatus::Maintenance => "maintenance",
        };
        write!(f, "{}", s)
    }
}

/// The direction-normalised endpoint pair of a road. Capacity accounting is
/// undirected, so `A->B` and `B->A` map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentKey {
    a: NodeId,
    b: NodeId,
}

impl SegmentKey {
    pub fn new(x: NodeId, y: NodeId) -> Self {
        if x <= y { SegmentKey { a: x, b: y } } else { SegmentKey { a: y, b: x } }
    }

    pub fn between(x: &NodeId, y: &NodeId) -> Self {
        Self::new(x.clone(), y.clone())
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<->{}", self.a, self.b)
    }
}

/// A road segment between two nodes, the unit of capacity.
///
/// Weight and capacity are immutable base attributes; only `status` may
/// change after construction, and only through `GraphStore::set_status`.
#[derive(Debug, Clone)]
pub struct Road {
    pub name: EdgeName,
    pub from: NodeId,
    pub to: NodeId,
    /// Base travel cost, strictly positive.
    pub weight: f64,
    /// Maximum parallel bookings per slot window.
    pub capacity: u32,
    pub status: RoadStatus,
}

impl Road {
    pub fn from_dto(dto: &RoadDto) -> Result<Self> {
        if dto.from == dto.to {
            return Err(Error::InvalidRequest(format!("road endpoints must differ, got '{}' twice", dto.from)));
        }
        if !(dto.weight > 0.0) || !dto.weight.is_finite() {
            return Err(Error::InvalidRequest(format!("road weight must be a positive number, got {}", dto.weight)));
        }

        let name = match &dto.id {
            Some(id) => EdgeName::new(id.clone()),
            None => EdgeName::new(format!("{}--To--{}", dto.from, dto.to)),
        };

        Ok(Road {
            name,
            from: NodeId::new(dto.from.clone()),
            to: NodeId::new(dto.to.clone()),
            weight: dto.weight,
            capacity: dto.capacity,
            status: RoadStatus::parse(&dto.status)?,
        })
    }

    pub fn to_dto(&self) -> RoadDto {
        RoadDto {
            id: Some(self.name.to_string()),
            from: self.from.to_string(),
            to: self.to.to_string(),
            weight: self.weight,
            capacity: self.capacity,
            status: self.status.to_string(),
        }
    }

    pub fn segment_key(&self) -> SegmentKey {
        SegmentKey::between(&self.from, &self.to)
    }

    pub fn is_open(&self) -> bool {
        self.status == RoadStatus::Open
    }

    /// The opposite endpoint when traversing from `node`, or `None` if the
    /// road does not touch `node`.
    pub fn other_end(&self, node: &NodeId) -> Option<&NodeId> {
        if *node == self.from {
            Some(&self.to)
        } else if *node == self.to {
            Some(&self.from)
        } else {
            None
        }
    }
}
