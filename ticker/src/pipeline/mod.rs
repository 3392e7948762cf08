mod collect;
mod gather;
mod refine;
