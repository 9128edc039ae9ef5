use crate::Error;

/// handle to a variable added to a [`Program`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Var(usize);

/// constraint sense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Le,
    Ge,
    Eq,
}

impl From<Relation> for minilp::ComparisonOp {
    fn from(relation: Relation) -> Self {
        match relation {
            Relation::Le => minilp::ComparisonOp::Le,
            Relation::Ge => minilp::ComparisonOp::Ge,
            Relation::Eq => minilp::ComparisonOp::Eq,
        }
    }
}

/// the only surface the crate sees of the LP solver: add variables
/// with objective coefficients and bounds, add constraints, solve,
/// read values. the backend is minilp's simplex; a non-optimal
/// status maps onto [`Error::Optimization`].
pub struct Program {
    problem: minilp::Problem,
    vars: Vec<minilp::Variable>,
}

impl Program {
    pub fn maximize() -> Self {
        Self {
            problem: minilp::Problem::new(minilp::OptimizationDirection::Maximize),
            vars: Vec::new(),
        }
    }

    pub fn var(&mut self, objective: f64, (lo, hi): (f64, f64)) -> Var {
        self.vars.push(self.problem.add_var(objective, (lo, hi)));
        Var(self.vars.len() - 1)
    }

    pub fn constrain(&mut self, terms: &[(Var, f64)], relation: Relation, rhs: f64) {
        let expr = terms
            .iter()
            .map(|&(Var(i), coefficient)| (self.vars[i], coefficient))
            .collect::<Vec<(minilp::Variable, f64)>>();
        self.problem.add_constraint(expr, relation.into(), rhs);
    }

    pub fn solve(self) -> Result<Valuation, Error> {
        match self.problem.solve() {
            Ok(solution) => Ok(Valuation {
                solution,
                vars: self.vars,
            }),
            Err(status) => Err(Error::optimization(status.to_string())),
        }
    }
}

/// a solved program, ready to be read off
pub struct Valuation {
    solution: minilp::Solution,
    vars: Vec<minilp::Variable>,
}

impl Valuation {
    pub fn value(&self, Var(i): Var) -> f64 {
        self.solution[self.vars[i]]
    }
    pub fn objective(&self) -> f64 {
        self.solution.objective()
    }
}
