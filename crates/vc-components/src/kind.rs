//! Tagged union of all component models.

use vc_fluids::PropertyProvider;
use vc_graph::PortName;

use crate::boundary::{Sink, Source};
use crate::compressor::Compressor;
use crate::condenser::Condenser;
use crate::error::ComponentResult;
use crate::eval::{Equation, Evaluation, PortStates};
use crate::evaporator::Evaporator;
use crate::ihx::InternalHeatExchanger;
use crate::traits::CycleComponent;

#[derive(Clone, Debug, PartialEq)]
pub enum ComponentKind {
    Compressor(Compressor),
    Condenser(Condenser),
    Evaporator(Evaporator),
    InternalHeatExchanger(InternalHeatExchanger),
    Source(Source),
    Sink(Sink),
}

impl ComponentKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ComponentKind::Compressor(_) => "Compressor",
            ComponentKind::Condenser(_) => "Condenser",
            ComponentKind::Evaporator(_) => "Evaporator",
            ComponentKind::InternalHeatExchanger(_) => "InternalHeatExchanger",
            ComponentKind::Source(_) => "Source",
            ComponentKind::Sink(_) => "Sink",
        }
    }

    fn model(&self) -> &dyn CycleComponent {
        match self {
            ComponentKind::Compressor(c) => c,
            ComponentKind::Condenser(c) => c,
            ComponentKind::Evaporator(c) => c,
            ComponentKind::InternalHeatExchanger(c) => c,
            ComponentKind::Source(c) => c,
            ComponentKind::Sink(c) => c,
        }
    }
}

impl CycleComponent for ComponentKind {
    fn ports(&self) -> &'static [PortName] {
        self.model().ports()
    }

    fn equations(&self) -> Vec<Equation> {
        self.model().equations()
    }

    fn validate(&self) -> ComponentResult<()> {
        self.model().validate()
    }

    fn evaluate(&self, props: &dyn PropertyProvider, ports: &PortStates) -> ComponentResult<Evaluation> {
        self.model().evaluate(props, ports)
    }
}

impl From<Compressor> for ComponentKind {
    fn from(c: Compressor) -> Self {
        ComponentKind::Compressor(c)
    }
}

impl From<Condenser> for ComponentKind {
    fn from(c: Condenser) -> Self {
        ComponentKind::Condenser(c)
    }
}

impl From<Evaporator> for ComponentKind {
    fn from(c: Evaporator) -> Self {
        ComponentKind::Evaporator(c)
    }
}

impl From<InternalHeatExchanger> for ComponentKind {
    fn from(c: InternalHeatExchanger) -> Self {
        ComponentKind::InternalHeatExchanger(c)
    }
}

impl From<Source> for ComponentKind {
    fn from(c: Source) -> Self {
        ComponentKind::Source(c)
    }
}

impl From<Sink> for ComponentKind {
    fn from(c: Sink) -> Self {
        ComponentKind::Sink(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_core::pa;

    #[test]
    fn dispatch_reaches_variant() {
        let kind: ComponentKind = Sink { p: Some(pa(1e5)) }.into();
        assert_eq!(kind.type_name(), "Sink");
        assert_eq!(kind.ports(), &[PortName::InletA]);
        assert_eq!(kind.equations().len(), 1);
    }
}
