//**********************************************************************
// This file is part of epstein-rs                                     *
// Copyright 2023 Matthew R. Hennefarth                                *
//**********************************************************************

//! The summand function G of Crandall's formula, its regularization, and
//! their multi-index derivatives.

mod g;
mod g_der;
mod poly;

pub(crate) use g::{arg_bound, crandall_g, crandall_g_reg};
pub(crate) use g_der::{crandall_g_der, crandall_g_reg_der};
pub(crate) use poly::{log_l_der, polynomial_l, polynomial_p, polynomial_y_der};
