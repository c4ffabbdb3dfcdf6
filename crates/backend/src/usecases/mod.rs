pub mod u001_group_sort;
