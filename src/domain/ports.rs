use crate::domain::model::Milestone;
use crate::utils::error::Result;

/// Parameters of one enumeration run.
pub trait ConfigProvider {
    /// Inclusive ceiling on the last candidate tested.
    fn upper_bound(&self) -> u64;
    fn milestone_interval(&self) -> u64;
}

/// Destination of milestone notifications, called synchronously from the run loop.
pub trait MilestoneSink {
    fn notify(&mut self, milestone: &Milestone) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: MilestoneSink + ?Sized> MilestoneSink for &mut S {
    fn notify(&mut self, milestone: &Milestone) -> Result<()> {
        (**self).notify(milestone)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

impl<S: MilestoneSink + ?Sized> MilestoneSink for Box<S> {
    fn notify(&mut self, milestone: &Milestone) -> Result<()> {
        (**self).notify(milestone)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}
