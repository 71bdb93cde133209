use marrow_core::propagation::DomainEvents;
use marrow_core::propagation::Domains;
use marrow_core::propagation::EntailmentStatus;
use marrow_core::propagation::LocalId;
use marrow_core::propagation::Priority;
use marrow_core::propagation::PropagationContext;
use marrow_core::propagation::PropagationStatus;
use marrow_core::propagation::Propagator;
use marrow_core::propagation::PropagatorConstructor;
use marrow_core::propagation::PropagatorConstructorContext;
use marrow_core::propagation::ReadDomains;
use marrow_core::variables::DomainId;

/// The [`PropagatorConstructor`] for the [`BinaryNotEqualsPropagator`].
#[derive(Clone, Copy, Debug)]
pub struct BinaryNotEqualsPropagatorArgs {
    pub a: DomainId,
    pub b: DomainId,
}

impl PropagatorConstructor for BinaryNotEqualsPropagatorArgs {
    type PropagatorImpl = BinaryNotEqualsPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let BinaryNotEqualsPropagatorArgs { a, b } = self;

        // We only care about the case where one of the two is assigned
        context.register(a, DomainEvents::ASSIGN, LocalId::from(0));
        context.register(b, DomainEvents::ASSIGN, LocalId::from(1));

        BinaryNotEqualsPropagator { a, b }
    }
}

/// Propagator for the constraint `a != b`.
#[derive(Clone, Copy, Debug)]
pub struct BinaryNotEqualsPropagator {
    a: DomainId,
    b: DomainId,
}

impl Propagator for BinaryNotEqualsPropagator {
    fn name(&self) -> &str {
        "BinaryNotEq"
    }

    fn priority(&self) -> Priority {
        Priority::Binary
    }

    fn propagate_from_scratch(&mut self, mut context: PropagationContext) -> PropagationStatus {
        if let Some(value) = context.fixed_value(self.a) {
            let _ = context.remove(self.b, value)?;
        }
        if let Some(value) = context.fixed_value(self.b) {
            let _ = context.remove(self.a, value)?;
        }

        Ok(())
    }

    fn is_entailed(&self, domains: Domains) -> EntailmentStatus {
        match (domains.fixed_value(self.a), domains.fixed_value(self.b)) {
            (Some(a), Some(b)) if a == b => EntailmentStatus::Violated,
            _ if domains.upper_bound(self.a) < domains.lower_bound(self.b)
                || domains.upper_bound(self.b) < domains.lower_bound(self.a) =>
            {
                EntailmentStatus::Satisfied
            }
            (Some(a), _) if !domains.contains(self.b, a) => EntailmentStatus::Satisfied,
            (_, Some(b)) if !domains.contains(self.a, b) => EntailmentStatus::Satisfied,
            _ => EntailmentStatus::Undetermined,
        }
    }
}
