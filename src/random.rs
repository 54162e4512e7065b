/*!

Seeded random number generation. Every source of randomness in a model is declared with
[`define_rng!`], which gives it its own generator. All generators are derived from one base
seed (set with [`ContextRandomExt::init_random`]) plus a hash of the generator's name, so
adding a new generator never perturbs the draws of an existing one.

*/

use crate::{
    context::Context,
    hashing::hash_str,
    log::trace,
    new_trait::New,
    type_of,
    HashMap,
    TypeId,
};
use rand::{Rng, SeedableRng};
use std::any::Any;

pub trait RngId: Any {
    #![allow(non_upper_case_globals)]
    const new: &'static dyn Fn(u64) -> Self;
    const name: &'static str;
    type RngType: SeedableRng;
    fn rng(&mut self) -> &mut Self::RngType;
}

struct RngPlugin {
    base_seed: u64,
    // `TypeId` of an `RngId` to a boxed instance of that `RngId`
    rng_map: HashMap<TypeId, Box<dyn Any>>,
}

impl RngPlugin {
    fn get_rng<R: RngId>(&mut self) -> &mut R::RngType {
        let base_seed = self.base_seed;
        self.rng_map
            .entry(type_of::<R>())
            .or_insert_with(|| {
                let seed = base_seed.wrapping_add(hash_str(R::name));
                trace!("creating generator {} with seed {seed}", R::name);
                Box::new(R::new(seed))
            })
            .downcast_mut::<R>()
            .expect("generator is stored under its own TypeId")
            .rng()
    }
}

impl New for RngPlugin {
    #[allow(non_upper_case_globals)]
    const new: &'static dyn Fn() -> Self = &|| RngPlugin {
        base_seed: 0,
        rng_map: HashMap::default(),
    };
}

pub trait ContextRandomExt {
    /// Sets the base seed and discards every existing generator, so each one is re-seeded
    /// from the new base seed the next time it is used.
    fn init_random(&mut self, base_seed: u64);

    /// Gets a random sample from the generator associated with the given `RngId` by applying
    /// the specified sampler function. A generator that has not been used yet is created from
    /// the base seed (0 if `init_random` was never called).
    fn sample<R: RngId + 'static, T>(&mut self, sampler: impl FnOnce(&mut R::RngType) -> T) -> T;

    /// Gets a random boolean value which is true with probability `p`
    /// using the generator associated with the given `RngId`.
    ///
    /// Panics if `p` is not in `[0, 1]`.
    fn sample_bool<R: RngId + 'static>(&mut self, p: f64) -> bool
    where
        R::RngType: Rng;
}

impl ContextRandomExt for Context {
    fn init_random(&mut self, base_seed: u64) {
        trace!("initializing random module with base seed {base_seed}");
        let rng_container = self.get_data_container_mut::<RngPlugin>();
        rng_container.base_seed = base_seed;
        rng_container.rng_map.clear();
    }

    fn sample<R: RngId + 'static, T>(&mut self, sampler: impl FnOnce(&mut R::RngType) -> T) -> T {
        let rng = self.get_data_container_mut::<RngPlugin>().get_rng::<R>();
        sampler(rng)
    }

    fn sample_bool<R: RngId + 'static>(&mut self, p: f64) -> bool
    where
        R::RngType: Rng,
    {
        self.sample::<R, bool>(|rng| rng.random_bool(p))
    }
}

/// Declares a named random number generator. The generator is a `StdRng` unless another
/// `SeedableRng` type is given.
#[macro_export]
macro_rules! define_rng {
    ($random_id:ident) => {
        $crate::define_rng!($random_id, $crate::rand::rngs::StdRng);
    };
    ($random_id:ident, $rng_type:ty) => {
        pub struct $random_id {
            rng: $rng_type,
        }

        impl $crate::random::RngId for $random_id {
            #![allow(non_upper_case_globals)]
            type RngType = $rng_type;
            const name: &'static str = stringify!($random_id);
            const new: &'static dyn Fn(u64) -> Self = &|seed| {
                use $crate::rand::SeedableRng;
                Self {
                    rng: <$rng_type>::seed_from_u64(seed),
                }
            };

            fn rng(&mut self) -> &mut Self::RngType {
                &mut self.rng
            }
        }
    };
}
pub use define_rng;
