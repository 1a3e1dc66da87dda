use std::convert::{TryFrom, TryInto};

use itertools::Itertools;
use num::Integer;

#[derive(Debug)]
pub struct IncompatiblePermutationSizes;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Permutation<T>
where
    T: TryInto<usize> + Clone + PartialEq + Default,
    <T as TryInto<usize>>::Error: std::fmt::Debug,
{
    pub raw: Vec<T>,
    cycles: Option<Vec<Vec<T>>>,
}

impl<T> Permutation<T>
where
    T: TryInto<usize> + Clone + PartialEq + Default,
    <T as TryInto<usize>>::Error: std::fmt::Debug,
{
    /// Builds a new permutation from the given vector but doesn't
    /// compute the cycles explicitly.
    pub fn new(raw: Vec<T>) -> Self {
        Permutation { raw, cycles: None }
    }

    /// Builds a new permutation from the given vector and
    /// compute the cycles explicitly.
    pub fn new_with_cycles(raw: Vec<T>) -> Self {
        let mut new = Permutation { raw, cycles: None };
        new.compute_cycles();
        new
    }

    /// Builds a new permutation form the given cycles.
    /// The cycles need to contain single element cycles as well.
    pub fn _from_cycles(cycles: Vec<Vec<T>>, size: usize) -> Self {
        let mut raw = vec![T::default(); size];

        for cycle in cycles.iter() {
            Self::_from_cycle(cycle, &mut raw);
        }

        let cycles = cycles.into_iter().filter(|cycle| cycle.len() > 1).collect();

        Permutation {
            raw,
            cycles: Some(cycles),
        }
    }

    /// Standard composition of permutations where the right
    /// permutation is applied first (i.e. the inner one).
    ///
    /// (x . y)(a) = x(y(a))
    pub fn _compose(left: &Self, right: &Self) -> Result<Self, IncompatiblePermutationSizes> {
        if left.len() != right.len() {
            return Err(IncompatiblePermutationSizes);
        }

        let mut compositum = Permutation {
            cycles: None,
            ..right.clone()
        };
        compositum._compose_with(left)?;

        Ok(compositum)
    }

    /// Composes another permutation with this permutation.
    /// The other permutation is the subsequent one.
    ///
    /// In-place version of [`Permutation::compose`].
    pub fn _compose_with(
        &mut self,
        subsequent_perm: &Self,
    ) -> Result<(), IncompatiblePermutationSizes> {
        if self.len() != subsequent_perm.len() {
            return Err(IncompatiblePermutationSizes);
        }

        for value in self.raw.iter_mut() {
            let self_index: usize = value.clone().try_into().unwrap();
            let subsequent_value = subsequent_perm.get(self_index).unwrap();
            *value = subsequent_value.clone();
        }

        Ok(())
    }

    pub fn _nth_power(&mut self, n: usize) {
        let self_copy = self.clone();

        for _ in 1..n {
            self._compose_with(&self_copy).unwrap();
        }
    }

    pub fn _nth_power_of(&self, n: usize) -> Self {
        let mut self_copy = self.clone();

        for _ in 1..n {
            self_copy._compose_with(self).unwrap();
        }

        self_copy
    }

    pub fn _nth_power_mod(&mut self, mut n: usize) {
        let order = self._get_order();
        n %= order;
        self._nth_power(n);
    }

    pub fn _nth_power_of_mod(&self, mut n: usize) -> Self {
        let mut self_copy = self.clone();

        let order = self_copy._get_order();
        n %= order;

        for _ in 1..n {
            self_copy._compose_with(self).unwrap();
        }

        self_copy
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Computes the order of the permutation. This is the same as the size
    /// of the subgroup generated by this permutation.
    /// The order is the least common multiple of all cycle lengths as each
    /// cycle has a period of its own length.
    pub fn _get_order(&mut self) -> usize {
        if self.cycles.is_none() {
            self.compute_cycles();
        }

        match &self.cycles {
            Some(cycles) => {
                let mut size = 1;

                for cycle in cycles.iter() {
                    size = size.lcm(&cycle.len());
                }

                size
            }
            None => unreachable!(),
        }
    }

    /// Evaluate the permutation for a single value.
    pub fn _evaluate(&self, in_value: &T) -> Option<T> {
        self.get(in_value.clone().try_into().unwrap()).map(T::clone)
    }

    /// Apply the permutation to the given iterator.
    pub fn _apply<I>(self, iterator: I) -> impl Iterator<Item = T>
    where
        I: Iterator<Item = T>,
    {
        iterator.map(move |value| self._evaluate(&value.clone()).unwrap_or(value))
    }

    pub fn get_cycles(&mut self) -> Vec<Vec<T>> {
        if self.cycles.is_none() {
            self.compute_cycles();
        }

        self.cycles.clone().unwrap()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.raw.get(index)
    }

    fn _from_cycle(cycle: &[T], raw: &mut [T]) {
        let first = cycle.get(0).unwrap().clone();
        let mut last = first.clone();

        for current in cycle[1..].iter() {
            *raw.get_mut(last.try_into().unwrap()).unwrap() = current.clone();
            last = current.clone();
        }
        *raw.get_mut(last.try_into().unwrap()).unwrap() = first;
    }

    fn normalize_cycle(cycle: &mut [T]) {
        let min_index = cycle
            .iter()
            .position_min_by_key(|&x| x.clone().try_into().unwrap())
            .unwrap();
        cycle.rotate_left(min_index);
    }

    fn get_cycle(&self, from: T) -> Vec<T> {
        let mut cycle = vec![from.clone()];

        let mut value = self.get(from.clone().try_into().unwrap()).unwrap();

        loop {
            if value != &from {
                cycle.push(value.clone());
                value = self.get(value.clone().try_into().unwrap()).unwrap();
            } else {
                break;
            }
        }

        Self::normalize_cycle(&mut cycle);
        cycle
    }

    fn compute_cycles(&mut self) {
        let mut cycles = Vec::new();

        for (index, value) in self.raw.iter().enumerate() {
            if index != value.clone().try_into().unwrap()
                && !cycles.iter().any(|cycle: &Vec<T>| cycle.contains(value))
            {
                cycles.push(self.get_cycle(value.clone()));
            }
        }

        self.cycles = Some(cycles);
    }
}

impl<T> Permutation<T>
where
    T: TryInto<usize> + TryFrom<usize> + Clone + PartialEq + Default,
    <T as TryInto<usize>>::Error: std::fmt::Debug,
    <T as TryFrom<usize>>::Error: std::fmt::Debug,
{
    /// Builds the identity permutation on `n` points.
    pub fn identity(n: usize) -> Self {
        let raw = (0..n).map(|i| i.try_into().unwrap()).collect();
        Permutation::new(raw)
    }

    /// Builds the inverse permutation, i.e. `nu` such that
    /// `nu(self(x)) == x` for all `x`.
    pub fn invert(&self) -> Self {
        let mut inverted = vec![T::default(); self.len()];

        for (domain, image) in self.raw.iter().enumerate() {
            let image_index: usize = image.clone().try_into().unwrap();
            inverted[image_index] = domain.try_into().unwrap();
        }

        Permutation::new(inverted)
    }
}

impl<T> From<Vec<T>> for Permutation<T>
where
    T: TryInto<usize> + Clone + PartialEq + Default,
    <T as TryInto<usize>>::Error: std::fmt::Debug,
{
    fn from(raw: Vec<T>) -> Self {
        Permutation::new(raw)
    }
}
