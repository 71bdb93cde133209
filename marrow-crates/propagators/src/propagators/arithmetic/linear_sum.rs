use marrow_core::containers::HashMap;
use marrow_core::math::NumExt;
use marrow_core::propagation::Contradiction;
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

/// The relation between the weighted sum and the right-hand side of a linear constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinearComparator {
    Equal,
    LessOrEqual,
    GreaterOrEqual,
    NotEqual,
}

/// The [`PropagatorConstructor`] for the [`LinearSumPropagator`], posting
/// `\sum terms[i].0 * terms[i].1 <comparator> rhs`.
///
/// The terms are normalised on creation: repeated variables are merged, terms with a zero
/// coefficient and fixed variables are folded into the right-hand side, and `>=` is turned into
/// `<=` by negating both sides.
#[derive(Clone, Debug)]
pub struct LinearSumPropagatorArgs {
    pub terms: Vec<(i32, DomainId)>,
    pub comparator: LinearComparator,
    pub rhs: i32,
}

impl PropagatorConstructor for LinearSumPropagatorArgs {
    type PropagatorImpl = LinearSumPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let LinearSumPropagatorArgs {
            terms,
            comparator,
            rhs,
        } = self;

        let (sign, comparator) = match comparator {
            LinearComparator::GreaterOrEqual => (-1, LinearComparator::LessOrEqual),
            other => (1, other),
        };
        let mut rhs = sign * rhs as i64;

        let mut merged: Vec<(i64, DomainId)> = Vec::with_capacity(terms.len());
        let mut positions: HashMap<DomainId, usize> = HashMap::default();
        for (coefficient, variable) in terms {
            let coefficient = sign * coefficient as i64;
            match positions.get(&variable) {
                Some(&position) => merged[position].0 += coefficient,
                None => {
                    let _ = positions.insert(variable, merged.len());
                    merged.push((coefficient, variable));
                }
            }
        }

        let domains = context.domains();
        merged.retain(|&(coefficient, variable)| {
            if coefficient == 0 {
                return false;
            }
            match domains.fixed_value(variable) {
                Some(value) => {
                    rhs -= coefficient * value as i64;
                    false
                }
                None => true,
            }
        });

        // Positive coefficients first.
        merged.sort_by_key(|&(coefficient, _)| coefficient < 0);
        let num_positive = merged
            .iter()
            .take_while(|&&(coefficient, _)| coefficient > 0)
            .count();

        for (index, &(coefficient, variable)) in merged.iter().enumerate() {
            let events = match comparator {
                LinearComparator::LessOrEqual if coefficient > 0 => DomainEvents::LOWER_BOUND,
                LinearComparator::LessOrEqual => DomainEvents::UPPER_BOUND,
                LinearComparator::Equal => DomainEvents::BOUNDS,
                LinearComparator::NotEqual => DomainEvents::ASSIGN,
                LinearComparator::GreaterOrEqual => unreachable!("normalised into LessOrEqual"),
            };
            context.register(variable, events, LocalId::from(index as u32));
        }

        LinearSumPropagator {
            terms: merged.into(),
            num_positive,
            comparator,
            rhs,
        }
    }
}

/// Bounds consistent propagator for linear constraints, following Harvey and Schimpf.
///
/// The smallest and largest value of the weighted sum are computed from the bounds of the
/// variables; the difference to the right-hand side is the slack every single term can use.
#[derive(Clone, Debug)]
pub struct LinearSumPropagator {
    /// Terms with a positive coefficient come before terms with a negative one.
    terms: Box<[(i64, DomainId)]>,
    num_positive: usize,
    /// Never [`LinearComparator::GreaterOrEqual`].
    comparator: LinearComparator,
    rhs: i64,
}

impl LinearSumPropagator {
    fn positive_terms(&self) -> &[(i64, DomainId)] {
        &self.terms[..self.num_positive]
    }

    fn negative_terms(&self) -> &[(i64, DomainId)] {
        &self.terms[self.num_positive..]
    }

    fn minimum_sum(&self, domains: &impl ReadDomains) -> i64 {
        let positive = self
            .positive_terms()
            .iter()
            .map(|&(coefficient, variable)| coefficient * domains.lower_bound(variable) as i64)
            .sum::<i64>();
        let negative = self
            .negative_terms()
            .iter()
            .map(|&(coefficient, variable)| coefficient * domains.upper_bound(variable) as i64)
            .sum::<i64>();
        positive + negative
    }

    fn maximum_sum(&self, domains: &impl ReadDomains) -> i64 {
        let positive = self
            .positive_terms()
            .iter()
            .map(|&(coefficient, variable)| coefficient * domains.upper_bound(variable) as i64)
            .sum::<i64>();
        let negative = self
            .negative_terms()
            .iter()
            .map(|&(coefficient, variable)| coefficient * domains.lower_bound(variable) as i64)
            .sum::<i64>();
        positive + negative
    }

    /// Filters `\sum <= rhs`. Only maxima of the terms change, so the minimum sum is unaffected
    /// and a single pass reaches the fixpoint of this rule.
    fn filter_less_or_equal(
        &self,
        context: &mut PropagationContext,
    ) -> Result<bool, Contradiction> {
        let minimum_sum = self.minimum_sum(&*context);
        if minimum_sum > self.rhs {
            return Err(context.contradiction());
        }
        let slack = self.rhs - minimum_sum;

        let mut changed = false;
        for &(coefficient, variable) in self.positive_terms() {
            let term_minimum = coefficient * context.lower_bound(variable) as i64;
            let bound = (term_minimum + slack).div_floor_positive(coefficient);
            changed |= context.set_upper_bound(variable, saturate(bound))?;
        }
        for &(coefficient, variable) in self.negative_terms() {
            let term_minimum = coefficient * context.upper_bound(variable) as i64;
            let bound = (-(term_minimum + slack)).div_ceil_positive(-coefficient);
            changed |= context.set_lower_bound(variable, saturate(bound))?;
        }
        Ok(changed)
    }

    /// Filters `\sum >= rhs`, the mirror image of [`Self::filter_less_or_equal`].
    fn filter_greater_or_equal(
        &self,
        context: &mut PropagationContext,
    ) -> Result<bool, Contradiction> {
        let maximum_sum = self.maximum_sum(&*context);
        if maximum_sum < self.rhs {
            return Err(context.contradiction());
        }
        let slack = maximum_sum - self.rhs;

        let mut changed = false;
        for &(coefficient, variable) in self.positive_terms() {
            let term_maximum = coefficient * context.upper_bound(variable) as i64;
            let bound = (term_maximum - slack).div_ceil_positive(coefficient);
            changed |= context.set_lower_bound(variable, saturate(bound))?;
        }
        for &(coefficient, variable) in self.negative_terms() {
            let term_maximum = coefficient * context.lower_bound(variable) as i64;
            let bound = (slack - term_maximum).div_floor_positive(-coefficient);
            changed |= context.set_upper_bound(variable, saturate(bound))?;
        }
        Ok(changed)
    }

    /// Once a single variable is unfixed, the value which completes the sum is removed.
    fn filter_not_equal(&self, context: &mut PropagationContext) -> PropagationStatus {
        let mut fixed_sum = 0_i64;
        let mut unfixed = None;
        for &(coefficient, variable) in self.terms.iter() {
            match context.fixed_value(variable) {
                Some(value) => fixed_sum += coefficient * value as i64,
                None if unfixed.is_some() => return Ok(()),
                None => unfixed = Some((coefficient, variable)),
            }
        }

        let remainder = self.rhs - fixed_sum;
        match unfixed {
            None if remainder == 0 => Err(context.contradiction()),
            None => Ok(()),
            Some((coefficient, variable)) => {
                if remainder % coefficient == 0 {
                    if let Ok(value) = i32::try_from(remainder / coefficient) {
                        let _ = context.remove(variable, value)?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl Propagator for LinearSumPropagator {
    fn name(&self) -> &str {
        match self.comparator {
            LinearComparator::Equal => "LinearEq",
            LinearComparator::NotEqual => "LinearNe",
            _ => "LinearLeq",
        }
    }

    fn priority(&self) -> Priority {
        match self.terms.len() {
            0 | 1 => Priority::Unary,
            2 => Priority::Binary,
            3 => Priority::Ternary,
            _ => Priority::Linear,
        }
    }

    fn propagate_from_scratch(&mut self, mut context: PropagationContext) -> PropagationStatus {
        match self.comparator {
            LinearComparator::LessOrEqual => {
                let _ = self.filter_less_or_equal(&mut context)?;
            }
            LinearComparator::Equal => loop {
                let upper_changed = self.filter_less_or_equal(&mut context)?;
                let lower_changed = self.filter_greater_or_equal(&mut context)?;
                if !upper_changed && !lower_changed {
                    break;
                }
            },
            LinearComparator::NotEqual => self.filter_not_equal(&mut context)?,
            LinearComparator::GreaterOrEqual => unreachable!("normalised into LessOrEqual"),
        }
        Ok(())
    }

    fn is_entailed(&self, domains: Domains) -> EntailmentStatus {
        let minimum_sum = self.minimum_sum(&domains);
        let maximum_sum = self.maximum_sum(&domains);

        match self.comparator {
            LinearComparator::LessOrEqual if maximum_sum <= self.rhs => {
                EntailmentStatus::Satisfied
            }
            LinearComparator::LessOrEqual if minimum_sum > self.rhs => EntailmentStatus::Violated,
            LinearComparator::Equal
                if minimum_sum == maximum_sum && minimum_sum == self.rhs =>
            {
                EntailmentStatus::Satisfied
            }
            LinearComparator::Equal if self.rhs < minimum_sum || self.rhs > maximum_sum => {
                EntailmentStatus::Violated
            }
            LinearComparator::NotEqual if self.rhs < minimum_sum || self.rhs > maximum_sum => {
                EntailmentStatus::Satisfied
            }
            LinearComparator::NotEqual
                if minimum_sum == maximum_sum && minimum_sum == self.rhs =>
            {
                EntailmentStatus::Violated
            }
            _ => EntailmentStatus::Undetermined,
        }
    }
}

fn saturate(bound: i64) -> i32 {
    bound.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
